//! Extension handles and the namespace table.
//!
//! Every extension that registers behaviors owns a namespace named after its
//! lower-cased short name. The host is itself an extension whose namespace is
//! implied by unqualified identifiers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::identifier::{validate_part, Identifier, SEPARATOR};

// =============================================================================
// Extension
// =============================================================================

/// Handle of an independently loaded unit that contributes behaviors.
///
/// # Example
///
/// ```
/// use armory_core::namespace::Extension;
///
/// let ext = Extension::new("SkyPack");
/// assert_eq!(ext.name(), "SkyPack");
/// assert_eq!(ext.short_name(), "skypack");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extension {
    name: String,
}

impl Extension {
    /// Creates an extension handle from its display name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace this extension owns.
    #[must_use]
    pub fn short_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Builds an identifier in this extension's namespace.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MalformedIdentifier`] for invalid names.
    pub fn key(&self, name: &str) -> RegistryResult<Identifier> {
        Identifier::new(&self.short_name(), name)
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// =============================================================================
// Namespace Table
// =============================================================================

/// Maps namespace short-names to their owning extensions.
#[derive(Debug, Clone)]
pub struct NamespaceTable {
    host: String,
    extensions: BTreeMap<String, Extension>,
}

impl NamespaceTable {
    /// Creates a table containing only the host extension.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MalformedIdentifier`] when the host short-name
    /// is not a valid namespace.
    pub fn new(host: Extension) -> RegistryResult<Self> {
        let short = host.short_name();
        validate_part(&short, host.name())?;
        let mut extensions = BTreeMap::new();
        extensions.insert(short.clone(), host);
        Ok(Self {
            host: short,
            extensions,
        })
    }

    /// Returns the host namespace.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Enters an extension, replacing a previous handle with the same
    /// short-name. Returns true if the namespace was new.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MalformedIdentifier`] when the short-name is
    /// not a valid namespace.
    pub fn insert(&mut self, extension: Extension) -> RegistryResult<bool> {
        let short = extension.short_name();
        validate_part(&short, extension.name())?;
        Ok(self.extensions.insert(short, extension).is_none())
    }

    /// Looks up an extension by namespace, case-insensitively.
    #[must_use]
    pub fn get(&self, namespace: &str) -> Option<&Extension> {
        self.extensions.get(&namespace.to_lowercase())
    }

    /// Returns true if any extension besides the host is known.
    #[must_use]
    pub fn has_extensions(&self) -> bool {
        self.extensions.len() > 1
    }

    /// Returns the number of namespaces, host included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Always false; the host namespace is present from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Iterates extensions in namespace order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Extension)> {
        self.extensions.iter()
    }

    /// Parses identifier text.
    ///
    /// - `name` resolves to the host namespace.
    /// - `extension:name` requires `extension` to be known.
    /// - Anything with more than one separator is malformed.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownExtension`] or
    /// [`RegistryError::MalformedIdentifier`].
    pub fn parse(&self, input: &str) -> RegistryResult<Identifier> {
        let trimmed = input.trim();
        let mut parts = trimmed.split(SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), None, None) => Identifier::new(&self.host, name),
            (Some(namespace), Some(name), None) => {
                let Some(extension) = self.get(namespace) else {
                    return Err(RegistryError::UnknownExtension {
                        namespace: namespace.to_string(),
                    });
                };
                Identifier::new(&extension.short_name(), name)
            }
            _ => Err(RegistryError::malformed(input, "more than one namespace separator")),
        }
    }

    /// Parses the legacy unqualified form only.
    ///
    /// # Errors
    ///
    /// [`RegistryError::MalformedIdentifier`] if a separator is present.
    pub fn parse_legacy(&self, input: &str) -> RegistryResult<Identifier> {
        let trimmed = input.trim();
        if trimmed.contains(SEPARATOR) {
            return Err(RegistryError::malformed(input, "legacy identifiers are unqualified"));
        }
        Identifier::new(&self.host, trimmed)
    }

    /// Formats an identifier, omitting the host namespace.
    #[must_use]
    pub fn format_short(&self, id: &Identifier) -> String {
        if id.is_in(&self.host) {
            id.name().to_string()
        } else {
            id.to_string()
        }
    }
}
