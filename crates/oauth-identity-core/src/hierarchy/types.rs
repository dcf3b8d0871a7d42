//! Type descriptors and the descriptor registry.
//!
//! The host application has no runtime reflection to lean on, so every
//! type that participates in generic shape resolution registers a
//! descriptor up front: the interfaces it implements, its direct
//! supertype, and — when it is generic — whether it is an open definition
//! or a closed instantiation of one. The resolver walks this registry as
//! a small directed graph (interface edges fan out, supertype edges form
//! a single-parent chain).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ── TypeId ───────────────────────────────────────────────────────────────────

/// Unique identifier for a registered type.
///
/// Two instantiations of the same open definition carry distinct ids;
/// identity of the *definition* is what shape searches compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId(pub String);

impl TypeId {
    /// Create a type id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── TypeKind ─────────────────────────────────────────────────────────────────

/// Whether a descriptor denotes a contract or a concrete type.
///
/// The kind of the *shape* decides the search strategy: interface shapes
/// are matched against the implemented-interface set, class shapes
/// against the single-inheritance chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    /// An interface / contract type.
    Interface,
    /// A class or struct type.
    Class,
}

// ── GenericInfo ──────────────────────────────────────────────────────────────

/// Genericity of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenericInfo {
    /// Not generic at all.
    None,
    /// An open generic definition with named parameters,
    /// e.g. `TokenHandler<T>`.
    Definition {
        /// Parameter names, in declaration order.
        parameters: Vec<String>,
    },
    /// A closed instantiation of the definition identified by
    /// `definition`, e.g. `TokenHandler<RefreshToken>`.
    Instantiation {
        /// Id of the open definition this type instantiates.
        definition: TypeId,
        /// Concrete argument types, in parameter order.
        arguments: Vec<TypeId>,
    },
}

// ── TypeDescriptor ───────────────────────────────────────────────────────────

/// Immutable description of one type in the registry graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Registry handle for this type.
    pub id: TypeId,
    /// Human-readable name, e.g. `"TokenHandler<RefreshToken>"`.
    pub name: String,
    /// Contract or concrete type.
    pub kind: TypeKind,
    /// Open definition, closed instantiation, or neither.
    pub generic: GenericInfo,
    /// Interfaces implemented directly by this type, in declaration order.
    pub interfaces: Vec<TypeId>,
    /// Direct supertype, when the type extends one.
    pub supertype: Option<TypeId>,
}

impl TypeDescriptor {
    /// Describe a class or struct type.
    pub fn class(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TypeId::new(id),
            name: name.into(),
            kind: TypeKind::Class,
            generic: GenericInfo::None,
            interfaces: Vec::new(),
            supertype: None,
        }
    }

    /// Describe an interface type.
    pub fn interface(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::class(id, name)
        }
    }

    /// Mark this type as an open generic definition with the given
    /// parameter names.
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.generic = GenericInfo::Definition {
            parameters: parameters.into_iter().map(Into::into).collect(),
        };
        self
    }

    /// Mark this type as a closed instantiation of `definition` with the
    /// given concrete arguments.
    pub fn instantiates(mut self, definition: TypeId, arguments: impl IntoIterator<Item = TypeId>) -> Self {
        self.generic = GenericInfo::Instantiation {
            definition,
            arguments: arguments.into_iter().collect(),
        };
        self
    }

    /// Record a directly implemented interface. Declaration order is the
    /// order of `implements` calls.
    pub fn implements(mut self, interface: TypeId) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Record the direct supertype.
    pub fn extends(mut self, supertype: TypeId) -> Self {
        self.supertype = Some(supertype);
        self
    }

    /// Whether this descriptor is an open generic definition.
    pub fn is_definition(&self) -> bool {
        matches!(self.generic, GenericInfo::Definition { .. })
    }

    /// When this descriptor is a closed instantiation, the id of the open
    /// definition it instantiates.
    pub fn instantiation_of(&self) -> Option<&TypeId> {
        match &self.generic {
            GenericInfo::Instantiation { definition, .. } => Some(definition),
            _ => None,
        }
    }
}

// ── TypeRegistry ─────────────────────────────────────────────────────────────

/// In-memory registry of [`TypeDescriptor`] records keyed by [`TypeId`].
///
/// Holds owned copies of the descriptors and supports O(1) lookup by id.
/// The registry itself is inert data; all graph traversal lives in
/// [`crate::hierarchy::resolver`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeRegistry {
    types: HashMap<TypeId, TypeDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Register a descriptor. An existing descriptor with the same id is
    /// replaced.
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        self.types.insert(descriptor.id.clone(), descriptor);
    }

    /// Look up a descriptor by its id.
    pub fn get(&self, id: &TypeId) -> Option<&TypeDescriptor> {
        self.types.get(id)
    }

    /// Return the total number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Return `true` when no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
