//! The operator-only `cogs` command group.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::required_argument;
use crate::cog::services::{CogRegistryError, CogStateRegistry, ToggleOutcome};
use crate::command::{
    domain::{CommandError, CommandResult, InvocationContext},
    ports::CommandHandler,
};
use crate::response::{domain::RenderOptions, services::ResponseContext};
use crate::templates::{self, COG_LIST};

/// The cog lifecycle operation a `cogs` subcommand performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CogAction {
    List,
    Load,
    Unload,
    Reload,
    Enable,
    Disable,
}

impl CogAction {
    pub(super) const ALL: [Self; 6] = [
        Self::List,
        Self::Load,
        Self::Unload,
        Self::Reload,
        Self::Enable,
        Self::Disable,
    ];

    pub(super) const fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Load => "load",
            Self::Unload => "unload",
            Self::Reload => "reload",
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }

    pub(super) const fn help(self) -> &'static str {
        match self {
            Self::List => "List every cog and whether it is loaded and enabled",
            Self::Load => "Load a cog and register its commands",
            Self::Unload => "Unload a cog and remove its commands",
            Self::Reload => "Unload and load a cog again",
            Self::Enable => "Let a loaded cog's commands run again",
            Self::Disable => "Stop a cog's commands from running without unloading it",
        }
    }
}

#[derive(Serialize)]
struct CogEntry<'a> {
    name: &'a str,
    status: &'static str,
}

/// Runs one `cogs` subcommand against the cog registry.
#[derive(Debug, Clone)]
pub(super) struct CogsHandler {
    cogs: Arc<CogStateRegistry>,
    action: CogAction,
}

impl CogsHandler {
    pub(super) const fn new(cogs: Arc<CogStateRegistry>, action: CogAction) -> Self {
        Self { cogs, action }
    }

    async fn list(&self, response: &ResponseContext) -> CommandResult<()> {
        let states = self.cogs.list();
        let cogs: Vec<CogEntry<'_>> = states
            .iter()
            .map(|state| CogEntry {
                name: state.name().as_str(),
                status: state.status_label(),
            })
            .collect();
        let body = templates::render(COG_LIST, minijinja::context! { cogs })
            .map_err(|err| CommandError::unclassified(&err))?;
        response
            .neutral_with(body, RenderOptions::default().titled("Cogs:"))
            .await;
        Ok(())
    }

    async fn toggle(
        &self,
        name: &str,
        outcome: Result<ToggleOutcome, CogRegistryError>,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        match outcome.map_err(|err| CommandError::Failed(err.to_string()))? {
            ToggleOutcome::Enabled => response.success(format!("Cog `{name}` enabled.")).await,
            ToggleOutcome::Disabled => response.success(format!("Cog `{name}` disabled.")).await,
            ToggleOutcome::AlreadyEnabled => {
                response
                    .neutral(format!("Cog `{name}` is already enabled."))
                    .await
            }
            ToggleOutcome::AlreadyDisabled => {
                response
                    .neutral(format!("Cog `{name}` is already disabled."))
                    .await
            }
        };
        Ok(())
    }
}

#[async_trait]
impl CommandHandler for CogsHandler {
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let cog_name = || required_argument(invocation, "a cog name");
        match self.action {
            CogAction::List => self.list(response).await,
            CogAction::Load => {
                let name = cog_name()?;
                match self.cogs.load(name) {
                    Ok(_) => response.success(format!("Cog `{name}` loaded.")).await,
                    Err(CogRegistryError::AlreadyLoaded(cog)) => {
                        response.neutral(format!("Cog `{cog}` is already loaded.")).await
                    }
                    Err(err) => return Err(CommandError::Failed(err.to_string())),
                };
                Ok(())
            }
            CogAction::Unload => {
                let name = cog_name()?;
                match self.cogs.unload(name) {
                    Ok(_) => response.success(format!("Cog `{name}` unloaded.")).await,
                    Err(CogRegistryError::NotLoaded(cog)) => {
                        response.neutral(format!("Cog `{cog}` is already unloaded.")).await
                    }
                    Err(err) => return Err(CommandError::Failed(err.to_string())),
                };
                Ok(())
            }
            CogAction::Reload => {
                let name = cog_name()?;
                self.cogs
                    .reload(name)
                    .map_err(|err| CommandError::Failed(err.to_string()))?;
                response
                    .success(format!("Cog `{name}` successfully reloaded."))
                    .await;
                Ok(())
            }
            CogAction::Enable => {
                let name = cog_name()?;
                self.toggle(name, self.cogs.enable(name), response).await
            }
            CogAction::Disable => {
                let name = cog_name()?;
                self.toggle(name, self.cogs.disable(name), response).await
            }
        }
    }
}
