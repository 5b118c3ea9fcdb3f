//! The `settings` extension: `get` and `set` for per-guild settings.

use std::sync::Arc;

use async_trait::async_trait;

use super::{group::SubcommandRequired, require_guild, required_argument, setup_error};
use crate::builtin::domain::parse_channel;
use crate::cog::{
    domain::{CogDomainError, CogName},
    ports::{Extension, ExtensionError},
};
use crate::command::{
    domain::{CommandDescriptor, CommandError, CommandResult, Guards, InvocationContext},
    ports::CommandHandler,
};
use crate::gateway::domain::Capability;
use crate::prefix::services::{PrefixService, PrefixServiceError};
use crate::response::services::ResponseContext;
use crate::settings::{domain::ContestChannels, ports::GuildSettingsRepository};

const READ_GUARDS: Guards = Guards::none().guild_only();
const WRITE_GUARDS: Guards = Guards::none()
    .guild_only()
    .require_or_owner(Capability::ManageGuild);

fn prefix_error(err: PrefixServiceError) -> CommandError {
    match err {
        PrefixServiceError::Domain(domain) => CommandError::InvalidArguments(domain.to_string()),
        PrefixServiceError::Settings(settings) => CommandError::infrastructure(settings),
    }
}

struct GetPrefix {
    prefixes: PrefixService,
}

#[async_trait]
impl CommandHandler for GetPrefix {
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let guild = require_guild(invocation)?;
        let prefix = self.prefixes.current(guild).await.map_err(prefix_error)?;
        response
            .send_text(format!("Prefix for this server: `{prefix}`"))
            .await;
        Ok(())
    }
}

struct SetPrefix {
    prefixes: PrefixService,
}

#[async_trait]
impl CommandHandler for SetPrefix {
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let guild = require_guild(invocation)?;
        let raw = required_argument(invocation, "a prefix")?;
        let prefix = self.prefixes.set(guild, raw).await.map_err(prefix_error)?;
        response.send_text(format!("Set prefix to `{prefix}`")).await;
        Ok(())
    }
}

struct GetChannels {
    settings: Arc<dyn GuildSettingsRepository>,
}

#[async_trait]
impl CommandHandler for GetChannels {
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let guild = require_guild(invocation)?;
        let channels = self
            .settings
            .get_contest_channels(guild)
            .await
            .map_err(CommandError::infrastructure)?;
        let text = match channels {
            Some(channels) => format!(
                "Channels for this server: <#{}> and <#{}>.",
                channels.receive(),
                channels.vote()
            ),
            None => format!(
                "This server does not have channels set up yet, use `{}set channels <receive> [vote]`.",
                response.clean_prefix()
            ),
        };
        response.send_text(text).await;
        Ok(())
    }
}

struct SetChannels {
    settings: Arc<dyn GuildSettingsRepository>,
}

impl SetChannels {
    fn parse(arguments: &str) -> CommandResult<ContestChannels> {
        let channels = arguments
            .split_whitespace()
            .map(|token| {
                parse_channel(token).ok_or_else(|| {
                    CommandError::InvalidArguments(format!("`{token}` is not a channel"))
                })
            })
            .collect::<CommandResult<Vec<_>>>()?;
        match channels.as_slice() {
            [single] => Ok(ContestChannels::single(*single)),
            [receive, vote] => Ok(ContestChannels::new(*receive, *vote)),
            [] => Err(CommandError::InvalidArguments(
                "a receive channel is required".to_owned(),
            )),
            _ => Err(CommandError::InvalidArguments(
                "at most two channels may be given: <receive> [vote]".to_owned(),
            )),
        }
    }
}

#[async_trait]
impl CommandHandler for SetChannels {
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let guild = require_guild(invocation)?;
        let channels = Self::parse(invocation.arguments())?;
        self.settings
            .set_contest_channels(guild, channels)
            .await
            .map_err(CommandError::infrastructure)?;
        response
            .send_text(format!(
                "Set channels to <#{}> <#{}>",
                channels.receive(),
                channels.vote()
            ))
            .await;
        Ok(())
    }
}

/// Reads and changes the guild's prefix and contest channels.
pub struct SettingsExtension {
    name: CogName,
    prefixes: PrefixService,
    settings: Arc<dyn GuildSettingsRepository>,
}

impl std::fmt::Debug for SettingsExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsExtension")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl SettingsExtension {
    /// Creates the extension.
    ///
    /// # Errors
    ///
    /// Returns [`CogDomainError`] when the cog name is rejected.
    pub fn new(
        prefixes: PrefixService,
        settings: Arc<dyn GuildSettingsRepository>,
    ) -> Result<Self, CogDomainError> {
        Ok(Self {
            name: CogName::new("settings")?,
            prefixes,
            settings,
        })
    }
}

impl Extension for SettingsExtension {
    fn name(&self) -> &CogName {
        &self.name
    }

    fn description(&self) -> &str {
        "Sets and gets the settings for the bot"
    }

    fn commands(&self) -> Result<Vec<CommandDescriptor>, ExtensionError> {
        let descriptor = |name: &str, handler: Arc<dyn CommandHandler>| {
            CommandDescriptor::parse(name, handler).map_err(|err| setup_error(&err))
        };
        Ok(vec![
            descriptor("get", Arc::new(SubcommandRequired))?
                .with_help("Show the value of a setting")
                .with_guards(READ_GUARDS),
            descriptor(
                "get prefix",
                Arc::new(GetPrefix {
                    prefixes: self.prefixes.clone(),
                }),
            )?
            .with_help("Show the prefix configured for this server")
            .with_guards(READ_GUARDS),
            descriptor(
                "get channels",
                Arc::new(GetChannels {
                    settings: self.settings.clone(),
                }),
            )?
            .with_help("Show the contest receive and vote channels")
            .with_guards(READ_GUARDS),
            descriptor("set", Arc::new(SubcommandRequired))?
                .with_help("Change a setting (Manage Server)")
                .with_guards(WRITE_GUARDS),
            descriptor(
                "set prefix",
                Arc::new(SetPrefix {
                    prefixes: self.prefixes.clone(),
                }),
            )?
            .with_help("Set this server's prefix; surrounding quotes are stripped")
            .with_guards(WRITE_GUARDS),
            descriptor(
                "set channels",
                Arc::new(SetChannels {
                    settings: self.settings.clone(),
                }),
            )?
            .with_help("Set the contest channels: <receive> [vote]; one channel is used for both")
            .with_guards(WRITE_GUARDS),
        ])
    }
}
