//! # Armory Core
//!
//! Behavior registry and adapter resolution engine for Armory.
//!
//! Extensions contribute pluggable behaviors ("powers"). This crate resolves
//! their string identifiers, exposes their configurable fields by name, and
//! converts a behavior into whatever trigger shape a consumer needs.
//!
//! ## Architecture
//!
//! - **Behaviors**: [`Behavior`] instances and their [`BehaviorClass`] statics
//! - **Shapes**: one trait per trigger signature, grouped in [`ShapeViews`]
//! - **Registry**: identifiers, properties, metadata, descriptions
//! - **Adapters**: general-to-specific shape conversions with declared
//!   preference order
//! - **Overrides**: subtype-checked replacement of one behavior by another
//!
//! ## Usage
//!
//! ```rust,ignore
//! use armory_core::{Extension, Registry, RegistryConfig};
//!
//! let registry = Registry::new(RegistryConfig::default())?;
//! registry.register_plain_adapters();
//! registry.register(&Extension::new("SkyPack"), sky_pack::behavior_types())?;
//!
//! let id = registry.parse("skypack:skyhook")?;
//! let hook = registry.instantiate(&id)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod adapter;
pub mod behavior;
pub mod config;
pub mod cooldown;
pub mod description;
pub mod error;
pub mod identifier;
pub mod namespace;
pub mod override_graph;
pub mod plain_adapters;
pub mod property;
pub mod registry;
pub mod result;
pub mod shape;

#[cfg(test)]
mod tests;

pub use behavior::{Behavior, BehaviorClass, BehaviorMeta, BehaviorType};
pub use config::RegistryConfig;
pub use description::Description;
pub use error::{RegistryError, RegistryResult};
pub use identifier::Identifier;
pub use namespace::Extension;
pub use property::{AcceptedValues, Instigator, Preset, PropertyDescriptor, ValueType};
pub use registry::{RegistrationReport, Registry};
pub use result::{ChainDirective, OutcomeKind, PowerResult};
pub use shape::{ActorId, CapabilitySet, ShapeKind, ShapeViews, TriggerContext};
