//! Cog lifecycle services.

mod catalog;
mod registry;

pub use catalog::ExtensionCatalog;
pub use registry::{CogRegistryError, CogStateRegistry, ToggleOutcome};
