//! Handler for command groups invoked without a subcommand.

use async_trait::async_trait;

use crate::command::{
    domain::{CommandError, CommandResult, InvocationContext},
    ports::CommandHandler,
};
use crate::response::services::ResponseContext;

/// Points the caller at `help` for the group's subcommands.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct SubcommandRequired;

#[async_trait]
impl CommandHandler for SubcommandRequired {
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let group = invocation.path().qualified_name();
        if invocation.arguments().trim().is_empty() {
            return Err(CommandError::InvalidArguments(format!(
                "`{group}` needs a subcommand; see `{}help {group}`",
                response.clean_prefix()
            )));
        }
        Err(CommandError::InvalidArguments(format!(
            "`{group}` has no subcommand `{}`",
            invocation.arguments().trim()
        )))
    }
}
