//! Per-segment invocation context.

use super::CommandPath;
use crate::gateway::domain::{GuildId, Message};

/// What a handler is asked to do: the matched prefix, the resolved command
/// path, the remaining argument text and the origin message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    prefix: String,
    path: CommandPath,
    arguments: String,
    message: Message,
}

impl InvocationContext {
    /// Creates an invocation context.
    #[must_use]
    pub fn new(
        prefix: impl Into<String>,
        path: CommandPath,
        arguments: impl Into<String>,
        message: Message,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            path,
            arguments: arguments.into(),
            message,
        }
    }

    /// Returns the matched prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the resolved command path.
    #[must_use]
    pub const fn path(&self) -> &CommandPath {
        &self.path
    }

    /// Returns the argument text following the command path.
    #[must_use]
    pub fn arguments(&self) -> &str {
        &self.arguments
    }

    /// Returns the arguments split on whitespace.
    pub fn argument_tokens(&self) -> impl Iterator<Item = &str> {
        self.arguments.split_whitespace()
    }

    /// Returns the origin message.
    #[must_use]
    pub const fn message(&self) -> &Message {
        &self.message
    }

    /// Returns the origin guild, if any.
    #[must_use]
    pub const fn guild(&self) -> Option<GuildId> {
        self.message.guild_id()
    }
}
