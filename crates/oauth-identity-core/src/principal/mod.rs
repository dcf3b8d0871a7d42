//! Security principals — claims, identities, and principal merging.
//!
//! The principal module provides:
//! - Claim, identity, and principal value objects
//! - Claim lookup helpers
//! - Merging of partial principals into one composite principal

pub mod merge;
pub mod types;

pub use types::{Claim, Identity, Principal};

pub use merge::{merge_principals, COMPOSITE_AUTHENTICATION_METHOD};
