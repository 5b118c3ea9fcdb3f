//! Extension port.

use crate::cog::domain::CogName;
use crate::command::domain::CommandDescriptor;
use thiserror::Error;

/// A named group of commands that can be loaded and unloaded at runtime.
pub trait Extension: Send + Sync {
    /// Returns the cog name.
    fn name(&self) -> &CogName;

    /// Returns a one-line description for help listings.
    fn description(&self) -> &str;

    /// Builds the cog's command descriptors.
    ///
    /// Called on every load, so a reload picks up fresh handler state.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::Setup`] when the cog cannot be initialised.
    fn commands(&self) -> Result<Vec<CommandDescriptor>, ExtensionError>;
}

/// Errors raised while setting up an extension.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtensionError {
    /// The extension could not build its commands.
    #[error("extension setup failed: {0}")]
    Setup(String),
}
