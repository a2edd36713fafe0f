//! Localized description resolvers.
//!
//! Each extension may install one resolver per locale. A lookup routes by the
//! identifier's namespace, so an extension only ever describes its own
//! behaviors.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::identifier::Identifier;

/// Resolves `(behavior, property)` to text. A `None` property asks for the
/// behavior's own description.
pub type ResolverFn = dyn Fn(&Identifier, Option<&str>) -> Option<String> + Send + Sync;

/// Outcome of a description lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    /// The owning extension has no resolver for the locale.
    NoResolver,
    /// The resolver has no text for the request.
    NoEntry,
    /// Resolved text.
    Text(String),
}

impl Description {
    /// Returns the text, if resolved.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::NoResolver | Self::NoEntry => None,
        }
    }

    /// Consumes the lookup, returning the text if resolved.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::NoResolver | Self::NoEntry => None,
        }
    }
}

/// Resolvers keyed by `(namespace, locale)`.
#[derive(Clone, Default)]
pub struct DescriptionTable {
    resolvers: HashMap<(String, String), Arc<ResolverFn>>,
}

impl DescriptionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `resolver` for `namespace` in `locale`, replacing any
    /// previous one. Returns true if a resolver was replaced.
    pub fn insert<F>(&mut self, namespace: &str, locale: &str, resolver: F) -> bool
    where
        F: Fn(&Identifier, Option<&str>) -> Option<String> + Send + Sync + 'static,
    {
        self.resolvers
            .insert(
                (namespace.to_lowercase(), locale.to_string()),
                Arc::new(resolver),
            )
            .is_some()
    }

    /// Returns true if `namespace` has a resolver for `locale`.
    #[must_use]
    pub fn contains(&self, namespace: &str, locale: &str) -> bool {
        self.resolvers
            .contains_key(&(namespace.to_lowercase(), locale.to_string()))
    }

    /// Describes `id`, or one of its properties, in `locale`.
    #[must_use]
    pub fn resolve(&self, locale: &str, id: &Identifier, property: Option<&str>) -> Description {
        let key = (id.namespace().to_string(), locale.to_string());
        match self.resolvers.get(&key) {
            None => Description::NoResolver,
            Some(resolver) => {
                resolver(id, property).map_or(Description::NoEntry, Description::Text)
            }
        }
    }

    /// Returns the number of installed resolvers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Returns true if no resolver is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl fmt::Debug for DescriptionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.resolvers.keys().collect();
        keys.sort();
        f.debug_struct("DescriptionTable")
            .field("resolvers", &keys)
            .finish()
    }
}
