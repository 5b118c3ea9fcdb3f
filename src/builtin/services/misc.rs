//! The `misc` extension: `ping`, `restart` and `shutdown`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::setup_error;
use crate::builtin::{domain::LifecycleAction, ports::LifecycleControl};
use crate::cog::{
    domain::{CogDomainError, CogName},
    ports::{Extension, ExtensionError},
};
use crate::command::{
    domain::{CommandDescriptor, CommandError, CommandResult, Guards, InvocationContext},
    ports::CommandHandler,
};
use crate::response::{
    domain::{Accent, Response},
    services::ResponseContext,
};

/// Replies with the time between the message and its handling.
#[derive(Debug, Clone, Copy, Default)]
struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let elapsed = response.services().clock().utc() - invocation.message().created_at();
        let millis = elapsed.num_milliseconds().max(0);
        response
            .send_text(format!("Pong. Time taken: `{millis}ms`"))
            .await;
        Ok(())
    }
}

/// Announces and requests a restart or shutdown.
struct LifecycleHandler {
    lifecycle: Arc<dyn LifecycleControl>,
    action: LifecycleAction,
}

#[async_trait]
impl CommandHandler for LifecycleHandler {
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        let announcement = self.action.announcement();
        let services = response.services();
        if services.log_channel() != Some(response.channel()) {
            response.send_text(announcement).await;
        }
        services
            .report_to_operators(Response::new(Accent::Warning).with_body(announcement))
            .await;
        info!(
            action = %self.action,
            requested_by = %invocation.message().author().id(),
            "lifecycle change requested"
        );
        let requested = match self.action {
            LifecycleAction::Restart => self.lifecycle.request_restart().await,
            LifecycleAction::Shutdown => self.lifecycle.request_shutdown().await,
        };
        requested.map_err(CommandError::infrastructure)
    }
}

/// Small utility commands plus the operator's lifecycle controls.
pub struct MiscExtension {
    name: CogName,
    lifecycle: Arc<dyn LifecycleControl>,
}

impl std::fmt::Debug for MiscExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiscExtension")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl MiscExtension {
    /// Creates the extension.
    ///
    /// # Errors
    ///
    /// Returns [`CogDomainError`] when the cog name is rejected.
    pub fn new(lifecycle: Arc<dyn LifecycleControl>) -> Result<Self, CogDomainError> {
        Ok(Self {
            name: CogName::new("misc")?,
            lifecycle,
        })
    }

    fn lifecycle_command(
        &self,
        action: LifecycleAction,
    ) -> Result<CommandDescriptor, ExtensionError> {
        let handler = Arc::new(LifecycleHandler {
            lifecycle: self.lifecycle.clone(),
            action,
        });
        let help = match action {
            LifecycleAction::Restart => "Restart the bot",
            LifecycleAction::Shutdown => "Shut the bot down",
        };
        Ok(CommandDescriptor::parse(&action.to_string(), handler)
            .map_err(|err| setup_error(&err))?
            .with_help(help)
            .with_guards(Guards::none().owner_only())
            .hidden())
    }
}

impl Extension for MiscExtension {
    fn name(&self) -> &CogName {
        &self.name
    }

    fn description(&self) -> &str {
        "Miscellaneous commands"
    }

    fn commands(&self) -> Result<Vec<CommandDescriptor>, ExtensionError> {
        let ping = CommandDescriptor::parse("ping", Arc::new(PingHandler))
            .map_err(|err| setup_error(&err))?
            .with_help("Show how long the bot took to see your message");
        Ok(vec![
            ping,
            self.lifecycle_command(LifecycleAction::Restart)?,
            self.lifecycle_command(LifecycleAction::Shutdown)?,
        ])
    }
}
