//! Process lifecycle port.

use async_trait::async_trait;
use thiserror::Error;

/// Lets operator commands stop or restart the running bot.
#[async_trait]
pub trait LifecycleControl: Send + Sync {
    /// Asks the process to restart once in-flight work has finished.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Unavailable`] when nothing is listening for
    /// lifecycle requests.
    async fn request_restart(&self) -> Result<(), LifecycleError>;

    /// Asks the process to shut down once in-flight work has finished.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Unavailable`] when nothing is listening for
    /// lifecycle requests.
    async fn request_shutdown(&self) -> Result<(), LifecycleError>;
}

/// Errors returned by lifecycle controls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The request could not be delivered.
    #[error("lifecycle control unavailable: {0}")]
    Unavailable(String),
}
