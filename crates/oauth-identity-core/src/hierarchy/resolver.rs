//! Generic shape resolution over the descriptor registry.
//!
//! Given a subject type and an open generic definition (the "shape"),
//! find every generic instantiation of that shape in the subject's
//! inheritance/implementation graph:
//!
//! - interface shapes are matched against the full set of interfaces the
//!   subject implements, directly or transitively;
//! - class shapes are matched along the single-inheritance chain,
//!   starting at the subject itself.
//!
//! Every call recomputes its result from scratch; nothing is cached and
//! no state is shared between calls.

use std::collections::{HashSet, VecDeque};

use crate::error::{CoreError, Result};

use super::types::{TypeDescriptor, TypeId, TypeKind, TypeRegistry};

// ── find_matching_shapes ─────────────────────────────────────────────────────

/// Find every instantiation of `shape` in the hierarchy of `subject`.
///
/// `shape` must identify an open generic definition. When it is an
/// interface, the result lists each implemented interface whose
/// originating definition is `shape`, one entry per distinct
/// instantiation, in declaration order. When it is a class, the result
/// lists matches along the supertype chain in derived-to-base order.
///
/// Returns a freshly materialized sequence; callers may enumerate it any
/// number of times.
pub fn find_matching_shapes<'a>(
    registry: &'a TypeRegistry,
    subject: &TypeId,
    shape: &TypeId,
) -> Result<Vec<&'a TypeDescriptor>> {
    let subject_desc = registry
        .get(subject)
        .ok_or_else(|| CoreError::UnknownType(subject.clone()))?;
    let shape_desc = registry
        .get(shape)
        .ok_or_else(|| CoreError::UnknownType(shape.clone()))?;

    if !shape_desc.is_definition() {
        return Err(CoreError::NotGenericDefinition(shape.clone()));
    }

    let matches: Vec<&TypeDescriptor> = match shape_desc.kind {
        TypeKind::Interface => implemented_interfaces(registry, subject_desc)
            .into_iter()
            .filter(|candidate| candidate.instantiation_of() == Some(shape))
            .collect(),
        TypeKind::Class => supertype_chain(registry, subject_desc)
            .into_iter()
            .filter(|candidate| candidate.instantiation_of() == Some(shape))
            .collect(),
    };

    log::trace!(
        "shape search: {} instantiation(s) of {} in hierarchy of {}",
        matches.len(),
        shape,
        subject
    );
    Ok(matches)
}

// ── find_first_matching_shape ────────────────────────────────────────────────

/// Return the first instantiation of `shape` in the hierarchy of
/// `subject`, or `None` when there is no match.
pub fn find_first_matching_shape<'a>(
    registry: &'a TypeRegistry,
    subject: &TypeId,
    shape: &TypeId,
) -> Result<Option<&'a TypeDescriptor>> {
    Ok(find_matching_shapes(registry, subject, shape)?.into_iter().next())
}

// ── Internal walks ───────────────────────────────────────────────────────────

/// Enumerate every interface implemented by `subject`, directly or
/// transitively.
///
/// Order: the subject's own declared interfaces first, then those
/// declared along the supertype chain in derived-to-base order, then
/// superinterfaces breadth-first. Duplicate ids are reported once, at
/// their first position. Edges to unregistered ids are skipped.
fn implemented_interfaces<'a>(
    registry: &'a TypeRegistry,
    subject: &'a TypeDescriptor,
) -> Vec<&'a TypeDescriptor> {
    let mut queue: VecDeque<&TypeId> = VecDeque::new();
    for descriptor in supertype_chain(registry, subject) {
        queue.extend(descriptor.interfaces.iter());
    }

    let mut seen: HashSet<&TypeId> = HashSet::new();
    let mut ordered: Vec<&TypeDescriptor> = Vec::new();
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        if let Some(descriptor) = registry.get(id) {
            ordered.push(descriptor);
            queue.extend(descriptor.interfaces.iter());
        }
    }
    ordered
}

/// Walk the single-inheritance chain starting at `subject` itself.
///
/// A miswired registry could make the chain cyclic; the walk stops on
/// the first revisited id.
fn supertype_chain<'a>(
    registry: &'a TypeRegistry,
    subject: &'a TypeDescriptor,
) -> Vec<&'a TypeDescriptor> {
    let mut seen: HashSet<&TypeId> = HashSet::new();
    let mut chain: Vec<&TypeDescriptor> = Vec::new();
    let mut current = Some(subject);
    while let Some(descriptor) = current {
        if !seen.insert(&descriptor.id) {
            break;
        }
        chain.push(descriptor);
        current = descriptor.supertype.as_ref().and_then(|id| registry.get(id));
    }
    chain
}

// ── Tests ────────────────────────────────────────────────────────────────────
