//! The assembled bot.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{LifecycleSignal, run_status_rotation};
use crate::batch::{domain::BatchResult, services::MessageProcessor};
use crate::bot::domain::{StartupReport, StatusRotation, startup_announcement};
use crate::cog::services::CogStateRegistry;
use crate::command::services::CommandRegistry;
use crate::contest::services::ContestService;
use crate::gateway::domain::Message;
use crate::response::{
    domain::{Accent, Response},
    services::ResponseServices,
};

/// A fully wired bot. Build one with [`super::BotBuilder`].
#[derive(Debug)]
pub struct Bot {
    pub(super) processor: MessageProcessor,
    pub(super) services: ResponseServices,
    pub(super) commands: Arc<CommandRegistry>,
    pub(super) cogs: Arc<CogStateRegistry>,
    pub(super) lifecycle: Arc<LifecycleSignal>,
    pub(super) contest: Arc<ContestService>,
    pub(super) status_messages: Vec<String>,
    pub(super) status_interval: Duration,
    pub(super) initial_extensions: Vec<String>,
}

impl Bot {
    /// Announces the bot to operators and loads the initial extensions.
    ///
    /// A cog that fails to load is reported to the log channel; the rest
    /// still load.
    pub async fn start(&self) -> StartupReport {
        let now = self.services.clock().utc();
        self.services
            .report_to_operators(
                Response::new(Accent::Neutral).with_body(startup_announcement(now)),
            )
            .await;

        let mut report = StartupReport::default();
        for name in &self.initial_extensions {
            match self.cogs.load(name) {
                Ok(_) => {
                    info!(cog = %name, "initial extension loaded");
                    report.record_loaded(name);
                }
                Err(err) => {
                    warn!(cog = %name, error = %err, "initial extension failed to load");
                    self.services
                        .report_to_operators(
                            Response::new(Accent::Error)
                                .with_title(format!("Failed to load extension {name}"))
                                .with_body(err.to_string()),
                        )
                        .await;
                    report.record_failed(name, err.to_string());
                }
            }
        }
        report
    }

    /// Runs the inbound pipeline for one message.
    pub async fn handle_message(&self, message: &Message) -> BatchResult {
        self.processor.process(message).await
    }

    /// Spawns the presence rotation; it stops on the first lifecycle
    /// request.
    #[must_use]
    pub fn spawn_status_rotation(&self) -> JoinHandle<()> {
        tokio::spawn(run_status_rotation(
            self.services.transport().clone(),
            StatusRotation::new(self.status_messages.iter().cloned()),
            self.status_interval,
            self.lifecycle.subscribe(),
        ))
    }

    /// Returns the lifecycle signal raised by `restart` and `shutdown`.
    #[must_use]
    pub const fn lifecycle(&self) -> &Arc<LifecycleSignal> {
        &self.lifecycle
    }

    /// Returns the command registry.
    #[must_use]
    pub const fn commands(&self) -> &Arc<CommandRegistry> {
        &self.commands
    }

    /// Returns the cog state registry.
    #[must_use]
    pub const fn cogs(&self) -> &Arc<CogStateRegistry> {
        &self.cogs
    }

    /// Returns the contest service.
    #[must_use]
    pub const fn contest(&self) -> &Arc<ContestService> {
        &self.contest
    }

    /// Returns the shared response collaborators.
    #[must_use]
    pub const fn services(&self) -> &ResponseServices {
        &self.services
    }
}
