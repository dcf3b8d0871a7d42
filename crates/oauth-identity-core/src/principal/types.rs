//! Claims, identities, and principals.
//!
//! A [`Claim`] is an atomic fact about a subject, an [`Identity`] is a
//! collection of claims from one credential source, and a [`Principal`]
//! wraps the identities established for one caller. All three are plain
//! immutable value objects; nothing here touches the network or a token
//! validator.

use serde::{Deserialize, Serialize};

// ── Claim ────────────────────────────────────────────────────────────────────

/// An atomic fact about a principal, expressed as a (type, value) pair.
///
/// The issuer records where the claim came from (e.g. the token issuer
/// URL) and is metadata only: equality and hashing consider the
/// (type, value) pair alone, which is what claim deduplication keys on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type, e.g. `"sub"`, `"name"`, `"email"`.
    pub claim_type: String,
    /// Claim value.
    pub value: String,
    /// Issuer metadata, when known.
    pub issuer: Option<String>,
}

impl Claim {
    /// Create a claim from a (type, value) pair.
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
            issuer: None,
        }
    }

    /// Create a claim carrying issuer metadata.
    pub fn with_issuer(
        claim_type: impl Into<String>,
        value: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            issuer: Some(issuer.into()),
            ..Self::new(claim_type, value)
        }
    }
}

impl PartialEq for Claim {
    fn eq(&self, other: &Self) -> bool {
        self.claim_type == other.claim_type && self.value == other.value
    }
}

impl Eq for Claim {}

impl std::hash::Hash for Claim {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.claim_type.hash(state);
        self.value.hash(state);
    }
}

// ── Identity ─────────────────────────────────────────────────────────────────

/// A collection of claims from one credential source, plus its
/// authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Claims asserted by this identity, in assertion order.
    pub claims: Vec<Claim>,
    /// Whether the subject behind this identity was verified.
    pub authenticated: bool,
    /// Label of the method that established the identity,
    /// e.g. `"bearer"` or `"userinfo"`. `None` for anonymous identities.
    pub authentication_method: Option<String>,
}

impl Identity {
    /// Create an authenticated identity with the given method label and
    /// no claims yet.
    pub fn authenticated(method: impl Into<String>) -> Self {
        Self {
            claims: Vec::new(),
            authenticated: true,
            authentication_method: Some(method.into()),
        }
    }

    /// Create an unauthenticated, claim-less identity.
    pub fn anonymous() -> Self {
        Self {
            claims: Vec::new(),
            authenticated: false,
            authentication_method: None,
        }
    }

    /// Append a claim, preserving assertion order.
    pub fn add_claim(mut self, claim: Claim) -> Self {
        self.claims.push(claim);
        self
    }

    /// Find the first claim of the given type.
    pub fn find_claim(&self, claim_type: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.claim_type == claim_type)
    }

    /// Whether a claim with this exact (type, value) pair is present.
    pub fn has_claim(&self, claim_type: &str, value: &str) -> bool {
        self.claims
            .iter()
            .any(|c| c.claim_type == claim_type && c.value == value)
    }
}

// ── Principal ────────────────────────────────────────────────────────────────

/// The security subject assembled from one or more credential sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identities established for this subject. The first one is primary.
    pub identities: Vec<Identity>,
}

impl Principal {
    /// Create a principal wrapping a single identity.
    pub fn new(identity: Identity) -> Self {
        Self {
            identities: vec![identity],
        }
    }

    /// Create a principal carrying one unauthenticated, claim-less
    /// identity — the explicit "no verifiable subject" value.
    pub fn anonymous() -> Self {
        Self::new(Identity::anonymous())
    }

    /// The primary identity, when any identity is present.
    pub fn primary(&self) -> Option<&Identity> {
        self.identities.first()
    }

    /// Whether the primary identity is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.primary().is_some_and(|i| i.authenticated)
    }

    /// Iterate every claim of every identity, in identity order then
    /// assertion order.
    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.identities.iter().flat_map(|i| i.claims.iter())
    }

    /// Find the first claim of the given type across all identities.
    pub fn find_claim(&self, claim_type: &str) -> Option<&Claim> {
        self.claims().find(|c| c.claim_type == claim_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_equality_ignores_issuer() {
        let a = Claim::new("sub", "1");
        let b = Claim::with_issuer("sub", "1", "https://idp.example.com");
        let c = Claim::new("sub", "2");
        assert_eq!(a, b, "equality is on (type, value) only");
        assert_ne!(a, c);
    }

    #[test]
    fn test_identity_claims() {
        let identity = Identity::authenticated("bearer")
            .add_claim(Claim::new("sub", "1"))
            .add_claim(Claim::new("name", "alice"))
            .add_claim(Claim::new("name", "alice b"));

        assert!(identity.authenticated);
        assert_eq!(identity.authentication_method.as_deref(), Some("bearer"));
        assert_eq!(
            identity.find_claim("name").map(|c| c.value.as_str()),
            Some("alice"),
            "find_claim returns the first of the type"
        );
        assert!(identity.has_claim("name", "alice b"));
        assert!(!identity.has_claim("name", "bob"));
    }

    #[test]
    fn test_anonymous_identity() {
        let identity = Identity::anonymous();
        assert!(!identity.authenticated);
        assert!(identity.authentication_method.is_none());
        assert!(identity.claims.is_empty());
    }

    #[test]
    fn test_principal_primary_and_claims() {
        let token_identity = Identity::authenticated("bearer").add_claim(Claim::new("sub", "1"));
        let userinfo_identity =
            Identity::authenticated("userinfo").add_claim(Claim::new("email", "a@example.com"));
        let principal = Principal {
            identities: vec![token_identity, userinfo_identity],
        };

        assert!(principal.is_authenticated());
        assert_eq!(
            principal.primary().and_then(|i| i.authentication_method.as_deref()),
            Some("bearer")
        );
        // claims() spans all identities in order.
        let types: Vec<&str> = principal.claims().map(|c| c.claim_type.as_str()).collect();
        assert_eq!(types, vec!["sub", "email"]);
        assert!(principal.find_claim("email").is_some());
    }

    #[test]
    fn test_anonymous_principal() {
        let principal = Principal::anonymous();
        assert!(!principal.is_authenticated());
        assert_eq!(principal.claims().count(), 0);
    }

    #[test]
    fn test_principal_json_round_trip() {
        let principal = Principal::new(
            Identity::authenticated("bearer")
                .add_claim(Claim::with_issuer("sub", "1", "https://idp.example.com"))
                .add_claim(Claim::new("name", "alice")),
        );

        let json = serde_json::to_string(&principal).expect("serialize principal");
        let back: Principal = serde_json::from_str(&json).expect("deserialize principal");
        assert_eq!(back, principal);
        assert_eq!(
            back.find_claim("sub").and_then(|c| c.issuer.as_deref()),
            Some("https://idp.example.com"),
            "issuer metadata survives the round trip"
        );
    }
}
