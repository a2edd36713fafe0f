//! Crate-level tests of the registry working as a whole.
//!
//! # Test Structure
//!
//! - `helpers.rs`: Fixture behaviors and registry setup
//! - `integration.rs`: End-to-end tests of registration, adapters and overrides
//! - `concurrency.rs`: Readers running against late registration

mod helpers;
mod integration;

// Re-export for convenience
pub use helpers::*;
