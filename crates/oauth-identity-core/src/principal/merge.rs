//! Principal merging — combine partial principals into one composite.
//!
//! After an OAuth/OIDC exchange the caller typically holds several
//! partial principals: one built from the access token, one from the
//! user-info response, sometimes one from an id token. [`merge_principals`]
//! folds them into a single composite principal with deduplicated claims.

use super::types::{Claim, Identity, Principal};

/// Authentication-method label carried by every merged composite
/// identity.
pub const COMPOSITE_AUTHENTICATION_METHOD: &str = "composite";

// ── merge_principals ─────────────────────────────────────────────────────────

/// Merge zero or more partial principals into one composite principal.
///
/// Absent elements are skipped. When no input principal's primary
/// identity is authenticated the result is [`Principal::anonymous`] —
/// the explicit "no verifiable subject" outcome used by delegation-only
/// flows, not an error.
///
/// Otherwise the composite identity is authenticated, labeled
/// [`COMPOSITE_AUTHENTICATION_METHOD`], and carries each input claim at
/// most once: principals in the order given, each principal's claims in
/// their existing order, first (type, value) occurrence wins, later
/// duplicates dropped silently.
pub fn merge_principals(principals: &[Option<Principal>]) -> Principal {
    let present = principals.iter().flatten();
    if !present.clone().any(Principal::is_authenticated) {
        log::debug!(
            "merge: no authenticated identity among {} principal(s), yielding anonymous",
            principals.len()
        );
        return Principal::anonymous();
    }

    let mut merged: Vec<Claim> = Vec::new();
    for principal in present {
        for claim in principal.claims() {
            if merged.iter().any(|existing| existing == claim) {
                log::trace!(
                    "merge: dropping duplicate claim {}={}",
                    claim.claim_type,
                    claim.value
                );
                continue;
            }
            merged.push(claim.clone());
        }
    }

    let mut composite = Identity::authenticated(COMPOSITE_AUTHENTICATION_METHOD);
    composite.claims = merged;
    Principal::new(composite)
}

// ── Tests ────────────────────────────────────────────────────────────────────
