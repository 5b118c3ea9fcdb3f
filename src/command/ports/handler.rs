//! Command handler port.

use async_trait::async_trait;

use crate::command::domain::{CommandResult, InvocationContext};
use crate::response::services::ResponseContext;

/// The body of a command.
///
/// Handlers reply through the [`ResponseContext`] and report failures as
/// [`crate::command::domain::CommandError`]; the dispatcher renders those
/// failures, so a handler should not also reply with its own error.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::command::domain::CommandError`] describing why the
    /// command could not complete.
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()>;
}
