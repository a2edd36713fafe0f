//! Namespaced behavior identifiers.
//!
//! An [`Identifier`] is a `(namespace, name)` pair. The textual form is
//! `namespace:name`; the unqualified form `name` belongs to the host namespace
//! and is expanded by [`NamespaceTable::parse`](crate::namespace::NamespaceTable::parse).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Separator between namespace and name.
pub const SEPARATOR: char = ':';

/// Globally unique name of a registered behavior.
///
/// # Example
///
/// ```
/// use armory_core::identifier::Identifier;
///
/// let id = Identifier::new("armory", "arrow").unwrap();
/// assert_eq!(id.to_string(), "armory:arrow");
/// assert_eq!(id.name(), "arrow");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier {
    namespace: Box<str>,
    name: Box<str>,
}

impl Identifier {
    /// Creates an identifier, validating both parts.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MalformedIdentifier`] when either part is
    /// empty or contains characters outside `[a-z0-9._/-]`.
    pub fn new(namespace: &str, name: &str) -> RegistryResult<Self> {
        validate_part(namespace, namespace)?;
        validate_part(name, name)?;
        Ok(Self {
            namespace: namespace.into(),
            name: name.into(),
        })
    }

    /// Returns the namespace (owning extension short-name).
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the name within the namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if this identifier lives in `namespace`.
    #[must_use]
    pub fn is_in(&self, namespace: &str) -> bool {
        &*self.namespace == namespace
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.namespace, self.name)
    }
}

/// Checks one identifier part against the namespaced-key alphabet.
pub(crate) fn validate_part(part: &str, input: &str) -> RegistryResult<()> {
    if part.is_empty() {
        return Err(RegistryError::malformed(input, "empty component"));
    }
    if let Some(bad) = part.chars().find(|c| !is_key_char(*c)) {
        return Err(RegistryError::malformed(input, format!("invalid character `{bad}`")));
    }
    Ok(())
}

fn is_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '-' | '/')
}
