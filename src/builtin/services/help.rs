//! The `help` command.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::cog::{domain::CogName, services::CogStateRegistry};
use crate::command::{
    domain::{CommandDescriptor, CommandError, CommandResult, InvocationContext},
    ports::CommandHandler,
    services::CommandRegistry,
};
use crate::response::{domain::RenderOptions, services::ResponseContext};
use crate::templates::{self, HELP_COMMAND, HELP_OVERVIEW, TemplateError};

/// Title of the group holding commands that belong to no cog.
const CORE_GROUP_TITLE: &str = "Core";

#[derive(Serialize)]
struct CommandEntry {
    name: String,
    aliases: Vec<String>,
    help: String,
}

impl From<&CommandDescriptor> for CommandEntry {
    fn from(descriptor: &CommandDescriptor) -> Self {
        Self {
            name: descriptor.qualified_name(),
            aliases: descriptor.aliases().to_vec(),
            help: descriptor.help().to_owned(),
        }
    }
}

#[derive(Serialize)]
struct Group {
    title: String,
    commands: Vec<CommandEntry>,
}

/// Lists visible commands, or describes one command or cog.
///
/// Hidden commands, commands inside hidden groups and commands that cannot
/// currently run are left out everywhere.
#[derive(Debug, Clone)]
pub(super) struct HelpHandler {
    commands: Arc<CommandRegistry>,
    cogs: Arc<CogStateRegistry>,
}

impl HelpHandler {
    pub(super) const fn new(commands: Arc<CommandRegistry>, cogs: Arc<CogStateRegistry>) -> Self {
        Self { commands, cogs }
    }

    fn is_listed(&self, descriptor: &CommandDescriptor) -> bool {
        if !self.commands.is_runnable(descriptor, self.cogs.as_ref()) {
            return false;
        }
        let mut current = Some(descriptor.clone());
        while let Some(command) = current {
            if command.is_hidden() {
                return false;
            }
            current = command
                .path()
                .parent()
                .and_then(|parent| self.commands.find(&parent));
        }
        true
    }

    fn overview(&self, prefix: &str) -> Result<String, TemplateError> {
        let mut grouped: BTreeMap<Option<CogName>, Vec<CommandEntry>> = BTreeMap::new();
        for descriptor in self.commands.all() {
            if descriptor.path().depth() == 1 && self.is_listed(&descriptor) {
                grouped
                    .entry(descriptor.cog().cloned())
                    .or_default()
                    .push(CommandEntry::from(&descriptor));
            }
        }
        let groups: Vec<Group> = grouped
            .into_iter()
            .map(|(cog, commands)| Group {
                title: cog.map_or_else(|| CORE_GROUP_TITLE.to_owned(), |name| name.to_string()),
                commands,
            })
            .collect();
        templates::render(HELP_OVERVIEW, minijinja::context! { prefix, groups })
    }

    fn command_detail(
        &self,
        prefix: &str,
        descriptor: &CommandDescriptor,
    ) -> Result<String, TemplateError> {
        let subcommands: Vec<CommandEntry> = self
            .commands
            .children_of(descriptor.path())
            .iter()
            .filter(|child| self.is_listed(child))
            .map(CommandEntry::from)
            .collect();
        templates::render(
            HELP_COMMAND,
            minijinja::context! {
                prefix,
                name => descriptor.qualified_name(),
                aliases => descriptor.aliases(),
                help => descriptor.help(),
                subcommands,
            },
        )
    }

    fn cog_detail(&self, prefix: &str, name: &CogName) -> Option<Result<String, TemplateError>> {
        let active = self.cogs.state(name).is_some_and(|state| state.is_active());
        if !active {
            return None;
        }
        let title = self
            .cogs
            .catalog()
            .get(name)
            .map_or_else(|| name.to_string(), |extension| {
                format!("{name}: {}", extension.description())
            });
        let commands: Vec<CommandEntry> = self
            .commands
            .descriptors_for(name)
            .iter()
            .filter(|descriptor| self.is_listed(descriptor))
            .map(CommandEntry::from)
            .collect();
        let groups = vec![Group { title, commands }];
        Some(templates::render(
            HELP_OVERVIEW,
            minijinja::context! { prefix, groups },
        ))
    }

    fn lookup(&self, prefix: &str, query: &str) -> Option<Result<String, TemplateError>> {
        let command = self
            .commands
            .resolve(query)
            .filter(|resolved| resolved.arguments().is_empty())
            .filter(|resolved| self.is_listed(resolved.descriptor()));
        if let Some(resolved) = command {
            return Some(self.command_detail(prefix, resolved.descriptor()));
        }
        let name = CogName::new(query).ok()?;
        self.cog_detail(prefix, &name)
    }
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let prefix = response.clean_prefix();
        let query = invocation.arguments().trim();
        let rendered = if query.is_empty() {
            self.overview(&prefix)
        } else {
            self.lookup(&prefix, query).ok_or_else(|| {
                CommandError::Failed(format!("No command called \"{query}\" found."))
            })?
        };
        let body = rendered.map_err(|err| CommandError::unclassified(&err))?;
        response
            .neutral_with(body, RenderOptions::default().titled("Help"))
            .await;
        Ok(())
    }
}
