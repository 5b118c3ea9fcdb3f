//! Command dispatch: lookup, guards and bounded handler invocation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{CommandRegistry, CooldownReservation, CooldownTracker, ResolvedCommand};
use crate::clock::SharedClock;
use crate::cog::domain::CogName;
use crate::command::domain::{
    CommandDescriptor, CommandError, GuardRejection, InvocationContext,
};
use crate::gateway::{
    domain::{Message, UserId},
    ports::PermissionSource,
};
use crate::response::services::ResponseContext;

/// Bounded wait applied to handler bodies.
pub const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(10);

/// Answers whether a cog's commands may currently run.
pub trait CogGate: Send + Sync {
    /// Returns `true` when `cog` is loaded and enabled.
    fn is_active(&self, cog: &CogName) -> bool;
}

/// The definite result of dispatching one command.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// The handler ran to completion.
    Executed,
    /// No runnable command matched the text.
    NotFound,
    /// A guard refused to run the command.
    Rejected(GuardRejection),
    /// The handler failed or timed out.
    Failed(CommandError),
}

impl DispatchOutcome {
    /// Returns `true` when the handler ran to completion.
    #[must_use]
    pub const fn is_executed(&self) -> bool {
        matches!(self, Self::Executed)
    }
}

/// Resolves command text and runs the matched command.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    cogs: Arc<dyn CogGate>,
    permissions: Arc<dyn PermissionSource>,
    cooldowns: CooldownTracker,
    owner: UserId,
    handler_timeout: Duration,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("owner", &self.owner)
            .field("handler_timeout", &self.handler_timeout)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher over the shared registry.
    #[must_use]
    pub fn new(
        registry: Arc<CommandRegistry>,
        cogs: Arc<dyn CogGate>,
        permissions: Arc<dyn PermissionSource>,
        clock: SharedClock,
        owner: UserId,
    ) -> Self {
        Self {
            registry,
            cogs,
            permissions,
            cooldowns: CooldownTracker::new(clock),
            owner,
            handler_timeout: DEFAULT_HANDLER_TIMEOUT,
        }
    }

    /// Overrides the handler bound.
    #[must_use]
    pub const fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Returns the operator identity.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Resolves `command_text` to a command that may currently run.
    ///
    /// A command whose own flag is off, whose cog is unloaded or disabled,
    /// or whose parent group is unavailable resolves to `None`.
    #[must_use]
    pub fn lookup(&self, command_text: &str) -> Option<ResolvedCommand> {
        let resolved = self.registry.resolve(command_text)?;
        self.registry
            .is_runnable(resolved.descriptor(), self.cogs.as_ref())
            .then_some(resolved)
    }

    /// Dispatches `command_text`, matched with `prefix`, on behalf of the
    /// message behind `response`.
    ///
    /// Never fails and never waits longer than the handler bound plus the
    /// guard lookups.
    pub async fn dispatch(
        &self,
        prefix: &str,
        command_text: &str,
        response: &ResponseContext,
    ) -> DispatchOutcome {
        let message = response.origin();
        let Some(resolved) = self.lookup(command_text) else {
            debug!(command = command_text, "no runnable command matched");
            return DispatchOutcome::NotFound;
        };
        let descriptor = resolved.descriptor();

        let reservation = match self.run_guards(descriptor, message).await {
            Ok(reservation) => reservation,
            Err(outcome) => return outcome,
        };

        let invocation = InvocationContext::new(
            prefix,
            descriptor.path().clone(),
            resolved.arguments(),
            message.clone(),
        );
        let invoked = tokio::time::timeout(
            self.handler_timeout,
            descriptor.handler().invoke(&invocation, response),
        )
        .await;

        let outcome = match invoked {
            Ok(Ok(())) => DispatchOutcome::Executed,
            Ok(Err(err)) => DispatchOutcome::Failed(err),
            Err(_) => DispatchOutcome::Failed(CommandError::Timeout(self.handler_timeout)),
        };

        match &outcome {
            DispatchOutcome::Executed => {
                info!(
                    command = %descriptor.path(),
                    author = %message.author().id(),
                    "command executed"
                );
            }
            DispatchOutcome::Failed(err) => {
                warn!(command = %descriptor.path(), error = %err, "command failed");
                if let Some(slot) = reservation {
                    self.cooldowns.release(slot);
                }
            }
            DispatchOutcome::NotFound | DispatchOutcome::Rejected(_) => {}
        }
        outcome
    }

    async fn run_guards(
        &self,
        descriptor: &CommandDescriptor,
        message: &Message,
    ) -> Result<Option<CooldownReservation>, DispatchOutcome> {
        let guards = descriptor.guards();
        let author = message.author().id();
        let is_owner = author == self.owner;

        if guards.is_owner_only() && !is_owner {
            debug!(command = %descriptor.path(), author = %author, "owner-only command refused");
            return Err(DispatchOutcome::Rejected(GuardRejection::NotOwner));
        }

        if guards.is_guild_only() && message.is_direct() {
            return Err(DispatchOutcome::Rejected(GuardRejection::GuildOnly));
        }

        if let Some(requirement) = guards.permission()
            && !(requirement.owner_bypass() && is_owner)
        {
            let Some(guild) = message.guild_id() else {
                return Err(DispatchOutcome::Rejected(GuardRejection::GuildOnly));
            };
            let granted = self
                .permissions
                .has_capability(author, guild, message.channel_id(), requirement.capability())
                .await
                .map_err(|err| DispatchOutcome::Failed(CommandError::infrastructure(err)))?;
            if !granted {
                return Err(DispatchOutcome::Rejected(
                    GuardRejection::MissingPermission(requirement.capability()),
                ));
            }
        }

        guards
            .cooldown_spec()
            .map(|spec| self.cooldowns.try_acquire(descriptor.path(), spec, message))
            .transpose()
            .map_err(DispatchOutcome::Rejected)
    }
}
