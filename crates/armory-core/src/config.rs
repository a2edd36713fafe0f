//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::identifier::{validate_part, SEPARATOR};

/// Namespace of the host when none is configured.
pub const DEFAULT_HOST_NAMESPACE: &str = "armory";

/// Locale used for descriptions when none is given.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Configuration for a [`Registry`](crate::registry::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Namespace implied by unqualified identifiers.
    pub host_namespace: String,
    /// Locale used by description lookups that do not name one.
    pub default_locale: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host_namespace: DEFAULT_HOST_NAMESPACE.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Create a config with the given host namespace.
    #[must_use]
    pub fn with_host(namespace: &str) -> Self {
        Self {
            host_namespace: namespace.to_string(),
            ..Default::default()
        }
    }

    /// Sets the default locale.
    #[must_use]
    pub fn locale(mut self, locale: &str) -> Self {
        self.default_locale = locale.to_string();
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidConfig`] when the host namespace is
    /// empty, not lower-case, contains the separator or other characters
    /// outside the identifier alphabet, or when the locale is empty.
    pub fn validate(&self) -> RegistryResult<()> {
        let namespace = &self.host_namespace;
        if namespace.contains(SEPARATOR) {
            return Err(invalid(format!("host namespace `{namespace}` contains `{SEPARATOR}`")));
        }
        if *namespace != namespace.to_lowercase() {
            return Err(invalid(format!("host namespace `{namespace}` is not lower-case")));
        }
        validate_part(namespace, namespace).map_err(|err| invalid(err.to_string()))?;
        if self.default_locale.trim().is_empty() {
            return Err(invalid("default locale is empty".to_string()));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> RegistryError {
    RegistryError::InvalidConfig { reason }
}
