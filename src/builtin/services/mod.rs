//! Built-in command handlers and the extensions that group them.

mod cogs;
mod contest;
mod core_commands;
mod group;
mod help;
mod misc;
mod settings;

pub use contest::ContestExtension;
pub use core_commands::CoreCommands;
pub use misc::MiscExtension;
pub use settings::SettingsExtension;

use crate::cog::ports::ExtensionError;
use crate::command::domain::{CommandDomainError, CommandError, InvocationContext};
use crate::gateway::domain::GuildId;

fn setup_error(err: &CommandDomainError) -> ExtensionError {
    ExtensionError::Setup(err.to_string())
}

fn require_guild(invocation: &InvocationContext) -> Result<GuildId, CommandError> {
    invocation
        .guild()
        .ok_or_else(|| CommandError::Failed("This command only works in a server.".to_owned()))
}

fn required_argument<'a>(
    invocation: &'a InvocationContext,
    what: &str,
) -> Result<&'a str, CommandError> {
    let argument = invocation.arguments().trim();
    if argument.is_empty() {
        return Err(CommandError::InvalidArguments(format!("{what} is required")));
    }
    Ok(argument)
}
