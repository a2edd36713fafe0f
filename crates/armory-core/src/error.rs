//! Typed failures surfaced by the registry.
//!
//! Every failure carries enough context (identifier, property, shape) for a
//! command or dispatch layer to render a localized message. Nothing here is a
//! generic catch-all.

use thiserror::Error;

use crate::identifier::Identifier;
use crate::shape::ShapeKind;

/// Convenience alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors produced by registry, adapter and override operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The namespace of a qualified identifier names no registered extension.
    #[error("unknown extension: {namespace}")]
    UnknownExtension {
        /// The namespace as written by the caller.
        namespace: String,
    },

    /// The identifier text cannot be parsed.
    #[error("malformed identifier `{input}`: {reason}")]
    MalformedIdentifier {
        /// The raw input.
        input: String,
        /// What is wrong with it.
        reason: String,
    },

    /// No behavior is registered under the identifier.
    #[error("unknown behavior: {id}")]
    UnknownBehavior {
        /// The identifier that failed to resolve.
        id: Identifier,
    },

    /// The behavior type declares no property with this name.
    #[error("behavior {behavior} has no property `{property}`")]
    UnregisteredProperty {
        /// The behavior, by identifier or type name.
        behavior: String,
        /// The requested property name.
        property: String,
    },

    /// The property codec rejected the raw value.
    #[error("invalid value `{value}` for property `{property}`: {reason}")]
    PropertyValue {
        /// The property being assigned.
        property: String,
        /// The raw value supplied.
        value: String,
        /// Codec failure reason.
        reason: String,
    },

    /// No adapter binding converts any of the instance's general shapes into
    /// the requested shape.
    #[error("no adapter from {behavior} to {desired}")]
    NoAdapter {
        /// Identifier of the behavior being adapted.
        behavior: Identifier,
        /// The requested shape.
        desired: ShapeKind,
    },

    /// The origin already has an override, or would override itself.
    #[error("cannot override {origin} with {replacement}: {reason}")]
    OverrideConflict {
        /// The overridden identifier.
        origin: Identifier,
        /// The proposed replacement.
        replacement: Identifier,
        /// Why the edge is refused.
        reason: String,
    },

    /// The replacement is not a behavioral subtype of the origin.
    #[error("{replacement} ({replacement_type}) is not a subtype of {origin} ({origin_type})")]
    OverrideTypeMismatch {
        /// The overridden identifier.
        origin: Identifier,
        /// Type name behind the origin.
        origin_type: &'static str,
        /// The proposed replacement.
        replacement: Identifier,
        /// Type name behind the replacement.
        replacement_type: &'static str,
    },

    /// The prototype of a behavior type could not be constructed.
    #[error("behavior type {type_name} is not instantiable: {reason}")]
    NotInstantiable {
        /// Type name of the behavior.
        type_name: String,
        /// Constructor failure message.
        reason: String,
    },

    /// A declaration hook of a behavior type panicked during registration.
    #[error("behavior type {type_name} panicked in `{hook}`: {reason}")]
    HookPanicked {
        /// Type name of the behavior.
        type_name: &'static str,
        /// The hook that panicked.
        hook: &'static str,
        /// Panic message.
        reason: String,
    },

    /// A behavior type declares two properties with the same name.
    #[error("duplicate property `{property}`")]
    DuplicateProperty {
        /// The repeated name.
        property: String,
    },

    /// The identifier (or the type) is already bound in the registry.
    #[error("{id} is already registered to {existing}")]
    DuplicateIdentifier {
        /// The identifier being registered.
        id: Identifier,
        /// Type name that already owns the binding.
        existing: String,
    },

    /// Registry configuration failed validation.
    #[error("invalid registry configuration: {reason}")]
    InvalidConfig {
        /// Validation failure.
        reason: String,
    },
}

impl RegistryError {
    /// Shorthand for a [`RegistryError::MalformedIdentifier`].
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
