//! Wiring of the dispatch services into a [`Bot`].

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use thiserror::Error;

use super::{Bot, DEFAULT_STATUS_INTERVAL, LifecycleSignal};
use crate::batch::services::{BatchExecutor, MessageProcessor};
use crate::builtin::services::{ContestExtension, CoreCommands, MiscExtension, SettingsExtension};
use crate::clock::SharedClock;
use crate::cog::{
    domain::CogDomainError,
    ports::Extension,
    services::{CogStateRegistry, ExtensionCatalog},
};
use crate::command::services::{
    CommandRegistry, CommandRegistryError, DEFAULT_HANDLER_TIMEOUT, Dispatcher,
};
use crate::contest::{adapters::InMemorySubmissions, ports::SubmissionRepository, services::ContestService};
use crate::gateway::{
    adapters::StaticPermissions,
    domain::{BotIdentity, ChannelId, UserId},
    ports::{ChatTransport, PermissionSource},
};
use crate::prefix::{
    domain::{Prefix, PrefixDomainError},
    services::{PrefixCache, PrefixResolver, PrefixService},
};
use crate::response::{adapters::InMemoryPasteBin, ports::PasteUploader, services::ResponseServices};
use crate::settings::{adapters::InMemoryGuildSettings, ports::GuildSettingsRepository};

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "!";

/// Errors raised while assembling a [`Bot`].
#[derive(Debug, Error)]
pub enum BotBuildError {
    /// The global prefix was rejected.
    #[error(transparent)]
    Prefix(#[from] PrefixDomainError),

    /// A built-in cog could not be named.
    #[error(transparent)]
    Cog(#[from] CogDomainError),

    /// The core commands could not be registered.
    #[error(transparent)]
    Registry(#[from] CommandRegistryError),
}

/// Builder for [`Bot`].
///
/// Every collaborator defaults to its in-memory adapter, so a builder with
/// only a transport yields a working bot.
pub struct BotBuilder {
    transport: Arc<dyn ChatTransport>,
    bot: BotIdentity,
    owner: UserId,
    settings: Arc<dyn GuildSettingsRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    uploader: Arc<dyn PasteUploader>,
    permissions: Arc<dyn PermissionSource>,
    clock: SharedClock,
    prefix: Option<String>,
    log_channel: Option<ChannelId>,
    handler_timeout: Duration,
    status_messages: Vec<String>,
    status_interval: Duration,
    initial_extensions: Vec<String>,
    extensions: Vec<Arc<dyn Extension>>,
    contest_seed: Option<u64>,
}

impl std::fmt::Debug for BotBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotBuilder")
            .field("bot", &self.bot)
            .field("owner", &self.owner)
            .field("prefix", &self.prefix)
            .field("log_channel", &self.log_channel)
            .field("initial_extensions", &self.initial_extensions)
            .finish_non_exhaustive()
    }
}

impl BotBuilder {
    /// Starts a builder for a bot speaking through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn ChatTransport>, bot: BotIdentity, owner: UserId) -> Self {
        Self {
            transport,
            bot,
            owner,
            settings: Arc::new(InMemoryGuildSettings::new()),
            submissions: Arc::new(InMemorySubmissions::new()),
            uploader: Arc::new(InMemoryPasteBin::new()),
            permissions: Arc::new(StaticPermissions::new()),
            clock: Arc::new(DefaultClock),
            prefix: None,
            log_channel: None,
            handler_timeout: DEFAULT_HANDLER_TIMEOUT,
            status_messages: Vec::new(),
            status_interval: DEFAULT_STATUS_INTERVAL,
            initial_extensions: Vec::new(),
            extensions: Vec::new(),
            contest_seed: None,
        }
    }

    /// Uses `settings` for guild settings persistence.
    #[must_use]
    pub fn with_settings(mut self, settings: Arc<dyn GuildSettingsRepository>) -> Self {
        self.settings = settings;
        self
    }

    /// Uses `submissions` for contest persistence.
    #[must_use]
    pub fn with_submissions(mut self, submissions: Arc<dyn SubmissionRepository>) -> Self {
        self.submissions = submissions;
        self
    }

    /// Uses `uploader` for oversized response bodies.
    #[must_use]
    pub fn with_uploader(mut self, uploader: Arc<dyn PasteUploader>) -> Self {
        self.uploader = uploader;
        self
    }

    /// Uses `permissions` to answer capability guards.
    #[must_use]
    pub fn with_permissions(mut self, permissions: Arc<dyn PermissionSource>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Uses `clock` for cooldowns, timestamps and latency.
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the global prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the operator log channel.
    #[must_use]
    pub const fn with_log_channel(mut self, channel: ChannelId) -> Self {
        self.log_channel = Some(channel);
        self
    }

    /// Bounds every handler invocation.
    #[must_use]
    pub const fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    /// Sets the presence lines rotated by [`Bot::spawn_status_rotation`].
    #[must_use]
    pub fn with_status_messages(mut self, messages: Vec<String>) -> Self {
        self.status_messages = messages;
        self
    }

    /// Sets the time between presence changes.
    #[must_use]
    pub const fn with_status_interval(mut self, interval: Duration) -> Self {
        self.status_interval = interval;
        self
    }

    /// Names the cogs loaded by [`Bot::start`].
    #[must_use]
    pub fn with_initial_extensions(mut self, names: Vec<String>) -> Self {
        self.initial_extensions = names;
        self
    }

    /// Adds an extension to the catalog next to the built-in cogs.
    #[must_use]
    pub fn with_extension(mut self, extension: Arc<dyn Extension>) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Seeds the contest id generator.
    #[must_use]
    pub const fn with_contest_seed(mut self, seed: u64) -> Self {
        self.contest_seed = Some(seed);
        self
    }

    /// Assembles the bot and registers the core commands.
    ///
    /// # Errors
    ///
    /// Returns [`BotBuildError::Prefix`] for an invalid global prefix and
    /// [`BotBuildError::Registry`] when a core command cannot be
    /// registered.
    pub fn build(self) -> Result<Bot, BotBuildError> {
        let global = Prefix::new(self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX))?;
        let base_services = ResponseServices::new(
            self.transport.clone(),
            self.uploader,
            self.clock.clone(),
            self.bot.clone(),
        );
        let services = match self.log_channel {
            Some(channel) => base_services.with_log_channel(channel),
            None => base_services,
        };

        let cache = Arc::new(PrefixCache::new(self.settings.clone()));
        let resolver = Arc::new(PrefixResolver::new(cache.clone(), global.clone(), self.bot));
        let prefixes = PrefixService::new(cache, global);

        let lifecycle = Arc::new(LifecycleSignal::new());
        let base_contest = ContestService::new(self.submissions, self.settings.clone());
        let contest = Arc::new(match self.contest_seed {
            Some(seed) => base_contest.with_seed(seed),
            None => base_contest,
        });

        let builtin: [Arc<dyn Extension>; 3] = [
            Arc::new(MiscExtension::new(lifecycle.clone())?),
            Arc::new(SettingsExtension::new(prefixes, self.settings.clone())?),
            Arc::new(ContestExtension::new(contest.clone(), self.settings)?),
        ];
        let catalog = builtin
            .into_iter()
            .chain(self.extensions)
            .fold(ExtensionCatalog::new(), ExtensionCatalog::with_extension);

        let commands = Arc::new(CommandRegistry::new());
        let cogs = Arc::new(CogStateRegistry::new(catalog, commands.clone()));
        let dispatcher = Arc::new(
            Dispatcher::new(
                commands.clone(),
                cogs.clone(),
                self.permissions,
                self.clock,
                self.owner,
            )
            .with_handler_timeout(self.handler_timeout),
        );
        CoreCommands::new(commands.clone(), cogs.clone()).register()?;

        let executor = Arc::new(BatchExecutor::new(resolver, dispatcher, services.clone()));
        Ok(Bot {
            processor: MessageProcessor::new(executor),
            services,
            commands,
            cogs,
            lifecycle,
            contest,
            status_messages: self.status_messages,
            status_interval: self.status_interval,
            initial_extensions: self.initial_extensions,
        })
    }
}
