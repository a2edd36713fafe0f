//! Override edges between registered behaviors.
//!
//! An extension may replace another behavior by registering an override
//! edge `origin -> replacement`. Edges obey three rules:
//!
//! - an origin has at most one outgoing edge,
//! - no edge points at its own origin,
//! - the replacement is a behavioral subtype of the origin.
//!
//! Resolution follows at most one edge; chains are never followed
//! transitively.

use std::collections::HashMap;

use crate::behavior::BehaviorType;
use crate::error::{RegistryError, RegistryResult};
use crate::identifier::Identifier;
use crate::shape::CapabilitySet;

/// One side of an override edge, as registered.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Registered identifier.
    pub id: Identifier,
    /// Type bound to the identifier.
    pub ty: BehaviorType,
    /// Shapes instances of the type expose.
    pub capabilities: CapabilitySet,
}

impl Endpoint {
    /// Returns true if `self` can stand in wherever `origin` is expected.
    ///
    /// The type must be `origin`'s type or declare it in its parent chain,
    /// and must expose every shape `origin` exposes.
    #[must_use]
    pub fn is_subtype_of(&self, origin: &Endpoint) -> bool {
        self.ty.descends_from(&origin.ty) && self.capabilities.contains(origin.capabilities)
    }
}

/// Directed origin to replacement map.
#[derive(Debug, Clone, Default)]
pub struct OverrideGraph {
    edges: HashMap<Identifier, Identifier>,
}

impl OverrideGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the edge `origin -> replacement`.
    ///
    /// The graph is unchanged on error.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::OverrideConflict`] for a self-loop or an origin
    ///   that is already overridden.
    /// - [`RegistryError::OverrideTypeMismatch`] when the replacement is not
    ///   a subtype of the origin.
    pub fn insert(&mut self, origin: &Endpoint, replacement: &Endpoint) -> RegistryResult<()> {
        if origin.id == replacement.id {
            return Err(conflict(origin, replacement, "a behavior cannot override itself"));
        }
        if let Some(existing) = self.edges.get(&origin.id) {
            return Err(conflict(
                origin,
                replacement,
                &format!("already overridden by {existing}"),
            ));
        }
        if !replacement.is_subtype_of(origin) {
            return Err(RegistryError::OverrideTypeMismatch {
                origin: origin.id.clone(),
                origin_type: origin.ty.type_name(),
                replacement: replacement.id.clone(),
                replacement_type: replacement.ty.type_name(),
            });
        }
        self.edges.insert(origin.id.clone(), replacement.id.clone());
        Ok(())
    }

    /// Returns the replacement registered for `origin`.
    #[must_use]
    pub fn get(&self, origin: &Identifier) -> Option<&Identifier> {
        self.edges.get(origin)
    }

    /// Follows at most one edge from `id`.
    #[must_use]
    pub fn substitute<'a>(&'a self, id: &'a Identifier) -> &'a Identifier {
        self.edges.get(id).unwrap_or(id)
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if there are no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates edges in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &Identifier)> {
        self.edges.iter()
    }
}

fn conflict(origin: &Endpoint, replacement: &Endpoint, reason: &str) -> RegistryError {
    RegistryError::OverrideConflict {
        origin: origin.id.clone(),
        replacement: replacement.id.clone(),
        reason: reason.to_string(),
    }
}
