//! Integration test: authorization round trip.
//!
//! Tests the complete client-side flow the core supports:
//! 1. Build an authorization request URL
//! 2. Parse the callback query string
//! 3. Resolve the generic validator shape for the grant type
//! 4. Build partial principals from token and user-info evidence
//! 5. Merge them into one composite principal

use oauth_identity_core::hierarchy::{
    find_first_matching_shape, TypeDescriptor, TypeId, TypeRegistry,
};
use oauth_identity_core::principal::merge::COMPOSITE_AUTHENTICATION_METHOD;
use oauth_identity_core::principal::{merge_principals, Claim, Identity, Principal};
use oauth_identity_core::querystring::{append_parameters, parse_query, QueryParameterSet};
use url::Url;

#[test]
fn authorization_round_trip() {
    // ── Step 1: Build the authorization request URL ──────────────────────
    let authorize = Url::parse("https://idp.example.com/connect/authorize")
        .expect("authorize endpoint should parse");

    let mut request = QueryParameterSet::new();
    request.append("client_id", "web-app");
    request.append("response_type", "code");
    request.append("scope", "openid");
    request.append("scope", "profile");
    request.append("redirect_uri", "https://client.example.com/signin callback");
    request.append("state", "af0ifjsldkj");

    let request_uri = append_parameters(&authorize, &request);
    let query = request_uri.query().expect("request URI should carry a query");
    assert!(
        query.contains("scope=openid&scope=profile"),
        "repeated scope values must stay in order"
    );
    assert!(
        query.contains("redirect_uri=https%3A%2F%2Fclient.example.com%2Fsignin%20callback"),
        "redirect URI must be query-component encoded, space as %20"
    );
    assert_eq!(request_uri.host_str(), Some("idp.example.com"));
    assert_eq!(request_uri.path(), "/connect/authorize");

    // ── Step 2: Parse the callback query ─────────────────────────────────
    let callback = "?code=SplxlOBeZQQYbYS6WxSbIA&state=af0ifjsldkj;session_state";
    let parameters = parse_query(callback);

    assert_eq!(
        parameters.get("code").map(<[String]>::to_vec),
        Some(vec!["SplxlOBeZQQYbYS6WxSbIA".to_string()])
    );
    assert_eq!(
        parameters.get("state").map(<[String]>::to_vec),
        Some(vec!["af0ifjsldkj".to_string()])
    );
    // Legacy ';' separator and the flag-style parameter both survive.
    assert_eq!(
        parameters.get("session_state").map(<[String]>::to_vec),
        Some(vec![String::new()])
    );

    // ── Step 3: Resolve the validator shape for the grant type ───────────
    let mut registry = TypeRegistry::new();
    registry.register(
        TypeDescriptor::interface("IGrantValidator`1", "IGrantValidator<T>")
            .with_parameters(["T"]),
    );
    registry.register(TypeDescriptor::class("AuthorizationCode", "AuthorizationCode"));
    registry.register(
        TypeDescriptor::interface(
            "IGrantValidator<AuthorizationCode>",
            "IGrantValidator<AuthorizationCode>",
        )
        .instantiates(
            TypeId::new("IGrantValidator`1"),
            [TypeId::new("AuthorizationCode")],
        ),
    );
    registry.register(
        TypeDescriptor::class("CodeGrantValidator", "CodeGrantValidator")
            .implements(TypeId::new("IGrantValidator<AuthorizationCode>")),
    );

    let resolved = find_first_matching_shape(
        &registry,
        &TypeId::new("CodeGrantValidator"),
        &TypeId::new("IGrantValidator`1"),
    )
    .expect("resolution should not hit a contract violation")
    .expect("the validator should instantiate the shape");
    assert_eq!(resolved.id, TypeId::new("IGrantValidator<AuthorizationCode>"));

    // ── Step 4: Build partial principals ─────────────────────────────────
    let from_token = Principal::new(
        Identity::authenticated("bearer")
            .add_claim(Claim::with_issuer("sub", "248289761001", "https://idp.example.com"))
            .add_claim(Claim::new("scope", "openid"))
            .add_claim(Claim::new("scope", "profile")),
    );
    let from_userinfo = Principal::new(
        Identity::authenticated("userinfo")
            .add_claim(Claim::new("sub", "248289761001"))
            .add_claim(Claim::new("name", "Jane Doe"))
            .add_claim(Claim::new("email", "janedoe@example.com")),
    );

    // ── Step 5: Merge into the composite principal ───────────────────────
    let composite = merge_principals(&[Some(from_token), None, Some(from_userinfo)]);

    assert!(composite.is_authenticated());
    let identity = composite.primary().expect("composite identity present");
    assert_eq!(
        identity.authentication_method.as_deref(),
        Some(COMPOSITE_AUTHENTICATION_METHOD)
    );

    // The duplicate sub claim from user-info was suppressed; the winner
    // keeps its issuer metadata.
    let subs: Vec<&Claim> = composite
        .claims()
        .filter(|c| c.claim_type == "sub")
        .collect();
    assert_eq!(subs.len(), 1, "duplicate sub claim must be suppressed");
    assert_eq!(subs[0].issuer.as_deref(), Some("https://idp.example.com"));

    let types: Vec<&str> = composite.claims().map(|c| c.claim_type.as_str()).collect();
    assert_eq!(
        types,
        vec!["sub", "scope", "scope", "name", "email"],
        "claims keep input order with duplicates removed"
    );
}

#[test]
fn delegation_only_flow_yields_anonymous() {
    // A client-credentials style exchange establishes no end-user
    // identity; the merge still produces a usable principal.
    let composite = merge_principals(&[None, Some(Principal::anonymous())]);
    assert!(!composite.is_authenticated());
    assert_eq!(composite.claims().count(), 0);
    assert_eq!(
        composite.identities.len(),
        1,
        "the no-subject outcome is an explicit identity, not an error"
    );
}
