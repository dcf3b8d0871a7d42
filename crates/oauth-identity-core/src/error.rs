//! Error types for the identity core.
//!
//! All errors are strongly typed and propagated without panicking.
//! Every variant is a programming-contract violation surfaced
//! synchronously to the caller; none is transient or retryable.

use crate::hierarchy::TypeId;

/// Contract-violation errors raised by the core algorithms.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required type handle is not present in the registry.
    #[error("Unknown type: {0}")]
    UnknownType(TypeId),

    /// The shape argument is a concrete instantiation or a non-generic
    /// type; shape searches accept only open generic definitions.
    #[error("Type {0} is not an open generic definition")]
    NotGenericDefinition(TypeId),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CoreError>;
