//! oauth-identity-core — core algorithms for an OAuth/OpenID Connect
//! identity stack.
//!
//! Provides three independent, side-effect-free components:
//! generic shape resolution over a type-descriptor registry,
//! a query string codec for protocol parameters, and
//! merging of partial security principals into one composite principal.
//!
//! Everything here is pure data transformation: no I/O, no cryptographic
//! validation, no network access. HTTP transport, token validation,
//! storage, and configuration are external collaborators.

pub mod error;
pub mod hierarchy;
pub mod principal;
pub mod querystring;

// Re-export primary types
pub use error::{CoreError, Result};
pub use hierarchy::{
    find_first_matching_shape, find_matching_shapes, GenericInfo, TypeDescriptor, TypeId,
    TypeKind, TypeRegistry,
};
pub use principal::{merge_principals, Claim, Identity, Principal};
pub use querystring::{append_parameter, append_parameters, parse_query, QueryParameterSet};
