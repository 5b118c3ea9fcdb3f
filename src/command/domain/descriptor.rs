//! Command descriptors.

use std::fmt;
use std::sync::Arc;

use super::{CommandDomainError, CommandPath, Guards};
use crate::cog::domain::CogName;
use crate::command::ports::CommandHandler;

/// Everything the registry knows about one command.
///
/// Descriptors are cheap to clone; the handler is shared.
#[derive(Clone)]
pub struct CommandDescriptor {
    path: CommandPath,
    aliases: Vec<String>,
    cog: Option<CogName>,
    enabled: bool,
    hidden: bool,
    help: String,
    guards: Guards,
    handler: Arc<dyn CommandHandler>,
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("path", &self.path)
            .field("aliases", &self.aliases)
            .field("cog", &self.cog)
            .field("enabled", &self.enabled)
            .field("hidden", &self.hidden)
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl CommandDescriptor {
    /// Creates an enabled, visible core command with no guards.
    #[must_use]
    pub fn new(path: CommandPath, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            path,
            aliases: Vec::new(),
            cog: None,
            enabled: true,
            hidden: false,
            help: String::new(),
            guards: Guards::none(),
            handler,
        }
    }

    /// Parses `qualified` and creates a descriptor for it.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::EmptyCommandPath`] when `qualified` is
    /// blank.
    pub fn parse(
        qualified: &str,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<Self, CommandDomainError> {
        Ok(Self::new(CommandPath::parse(qualified)?, handler))
    }

    /// Adds an alias for the last path token.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Assigns the command to `cog`.
    #[must_use]
    pub fn in_cog(mut self, cog: CogName) -> Self {
        self.cog = Some(cog);
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Hides the command from help listings.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Replaces the guard configuration.
    #[must_use]
    pub const fn with_guards(mut self, guards: Guards) -> Self {
        self.guards = guards;
        self
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns the qualified path.
    #[must_use]
    pub const fn path(&self) -> &CommandPath {
        &self.path
    }

    /// Returns the space-joined qualified name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.path.qualified_name()
    }

    /// Returns the aliases in declaration order.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the owning cog, or `None` for core commands.
    #[must_use]
    pub const fn cog(&self) -> Option<&CogName> {
        self.cog.as_ref()
    }

    /// Returns the command's own enabled flag.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` when the command is hidden from help.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Returns the help text.
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Returns the guard configuration.
    #[must_use]
    pub const fn guards(&self) -> Guards {
        self.guards
    }

    /// Returns the handler.
    #[must_use]
    pub const fn handler(&self) -> &Arc<dyn CommandHandler> {
        &self.handler
    }

    /// Returns every registry key this descriptor occupies: its path plus
    /// one path per alias, formed from the parent path and the alias.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::InvalidToken`] for an empty alias or one
    /// containing whitespace.
    pub fn lookup_keys(&self) -> Result<Vec<CommandPath>, CommandDomainError> {
        let mut keys = Vec::with_capacity(self.aliases.len() + 1);
        keys.push(self.path.clone());
        for alias in &self.aliases {
            let key = match self.path.parent() {
                Some(parent) => parent.child(alias)?,
                None => CommandPath::root(alias)?,
            };
            keys.push(key);
        }
        Ok(keys)
    }
}
