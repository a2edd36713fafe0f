//! Adapter bindings between capability shapes.
//!
//! An adapter converts a general view of a behavior (for example `dyn Plain`)
//! into a specific one (for example `dyn RightClick`). Bindings are keyed by
//! `(general, specific)`; registering a pair again replaces the previous
//! function.
//!
//! # Resolution
//!
//! [`AdapterTable::resolve`] runs in two stages:
//!
//! 1. Filter the type's declared general shapes down to the ones the
//!    instance actually exposes, keeping declaration order.
//! 2. Walk that list and use the first binding to the desired shape.
//!
//! The declared order alone decides the winner; the order in which bindings
//! were registered never matters.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::shape::{CapabilitySet, Shape, ShapeKind, ShapeViews};

type ConvertFn = dyn Fn(&ShapeViews) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync;

/// Table of `(general, specific)` conversions.
#[derive(Clone, Default)]
pub struct AdapterTable {
    bindings: HashMap<(ShapeKind, ShapeKind), Arc<ConvertFn>>,
}

impl AdapterTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds a conversion from shape `G` to shape `S`.
    ///
    /// Returns true if an existing binding for the pair was replaced.
    pub fn insert<G, S, F>(&mut self, convert: F) -> bool
    where
        G: Shape + ?Sized,
        S: Shape + ?Sized,
        F: Fn(Arc<G>) -> Arc<S> + Send + Sync + 'static,
    {
        let erased = move |views: &ShapeViews| {
            views
                .get::<G>()
                .map(|general| Box::new(convert(general)) as Box<dyn Any + Send + Sync>)
        };
        self.bindings
            .insert((G::KIND, S::KIND), Arc::new(erased))
            .is_some()
    }

    /// Returns true if a binding exists for the pair.
    #[must_use]
    pub fn contains(&self, general: ShapeKind, specific: ShapeKind) -> bool {
        self.bindings.contains_key(&(general, specific))
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Filters declared general shapes to those in `actual`, keeping order.
    #[must_use]
    pub fn preferences(declared: &[ShapeKind], actual: CapabilitySet) -> Vec<ShapeKind> {
        declared
            .iter()
            .copied()
            .filter(|kind| actual.has(*kind))
            .collect()
    }

    /// Converts `views` into shape `S` through the first applicable binding.
    ///
    /// Returns the general shape that was used along with the converted view,
    /// or `None` if no declared and exposed general shape has a binding to
    /// `S`.
    #[must_use]
    pub fn resolve<S: Shape + ?Sized>(
        &self,
        declared: &[ShapeKind],
        views: &ShapeViews,
    ) -> Option<(ShapeKind, Arc<S>)> {
        Self::preferences(declared, views.capabilities())
            .into_iter()
            .find_map(|general| {
                let convert = self.bindings.get(&(general, S::KIND))?;
                let converted = convert(views)?.downcast::<Arc<S>>().ok()?;
                Some((general, *converted))
            })
    }
}

impl fmt::Debug for AdapterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self.bindings.keys().collect();
        pairs.sort();
        f.debug_struct("AdapterTable")
            .field("bindings", &pairs)
            .finish()
    }
}
