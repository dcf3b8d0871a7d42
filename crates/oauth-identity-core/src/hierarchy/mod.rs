//! Generic type hierarchy resolution.
//!
//! The hierarchy module provides:
//! - A type-descriptor registry standing in for runtime reflection
//! - Shape searches over implemented interfaces and supertype chains

pub mod resolver;
pub mod types;

pub use types::{GenericInfo, TypeDescriptor, TypeId, TypeKind, TypeRegistry};

pub use resolver::{find_first_matching_shape, find_matching_shapes};
