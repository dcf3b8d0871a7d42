//! Merge Principals — combine token and user-info evidence into one
//! composite principal.
//!
//! Run with:
//!   cargo run --example merge_principals -p oauth-identity-core

use oauth_identity_core::principal::{merge_principals, Claim, Identity, Principal};

fn main() {
    // ── 1. Partial principals from two credential sources ───────────────────
    //
    // The access token asserts the subject and scopes; the user-info
    // response repeats the subject and adds profile claims.
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

    // ── 2. Merge ────────────────────────────────────────────────────────────
    //
    // First (type, value) occurrence wins; the duplicate sub claim from
    // user-info is dropped silently.
    let composite = merge_principals(&[Some(from_token), None, Some(from_userinfo)]);

    let identity = composite.primary().expect("composite identity present");
    println!("Composite principal");
    println!("  Authenticated: {}", identity.authenticated);
    println!(
        "  Method:        {}",
        identity.authentication_method.as_deref().unwrap_or("(none)")
    );
    println!("  Claims:");
    for claim in composite.claims() {
        match &claim.issuer {
            Some(issuer) => println!("    {} = {} (issuer: {issuer})", claim.claim_type, claim.value),
            None => println!("    {} = {}", claim.claim_type, claim.value),
        }
    }
}
