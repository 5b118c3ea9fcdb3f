//! Commands that exist regardless of which cogs are loaded.

use std::sync::Arc;

use super::{
    cogs::{CogAction, CogsHandler},
    group::SubcommandRequired,
    help::HelpHandler,
};
use crate::cog::services::CogStateRegistry;
use crate::command::{
    domain::{CommandDescriptor, CommandDomainError, CommandPath, Guards},
    services::{CommandRegistry, CommandRegistryError},
};

/// `help` and the operator-only `cogs` group.
#[derive(Debug, Clone)]
pub struct CoreCommands {
    commands: Arc<CommandRegistry>,
    cogs: Arc<CogStateRegistry>,
}

impl CoreCommands {
    /// Creates the core command set over the live registries.
    #[must_use]
    pub const fn new(commands: Arc<CommandRegistry>, cogs: Arc<CogStateRegistry>) -> Self {
        Self { commands, cogs }
    }

    /// Builds the core descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError`] when a built-in name is rejected.
    pub fn descriptors(&self) -> Result<Vec<CommandDescriptor>, CommandDomainError> {
        let help = CommandDescriptor::parse(
            "help",
            Arc::new(HelpHandler::new(self.commands.clone(), self.cogs.clone())),
        )?
        .with_help("Show this message, or details for a command or cog");

        let group_path = CommandPath::root("cogs")?;
        let group = CommandDescriptor::new(group_path.clone(), Arc::new(SubcommandRequired))
            .with_help("Manage loadable cogs")
            .with_guards(Guards::none().owner_only())
            .hidden();

        let mut descriptors = vec![help, group];
        for action in CogAction::ALL {
            let mut descriptor = CommandDescriptor::new(
                group_path.child(action.name())?,
                Arc::new(CogsHandler::new(self.cogs.clone(), action)),
            )
            .with_help(action.help())
            .with_guards(Guards::none().owner_only());
            descriptor = match action {
                CogAction::Load => descriptor.with_alias("add"),
                CogAction::Unload => descriptor.with_alias("remove"),
                CogAction::List
                | CogAction::Reload
                | CogAction::Enable
                | CogAction::Disable => descriptor,
            };
            descriptors.push(descriptor);
        }
        Ok(descriptors)
    }

    /// Registers the core commands.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError`] when a core name is already taken.
    pub fn register(&self) -> Result<(), CommandRegistryError> {
        self.commands.register_all(self.descriptors()?)
    }
}
