//! Shared fixtures for unit tests.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::batch::{
    domain::BatchResult,
    services::{BatchExecutor, MessageProcessor},
};
use crate::bot::services::{Bot, BotBuilder};
use crate::clock::{ManualClock, SharedClock};
use crate::cog::{
    domain::CogName,
    ports::{Extension, ExtensionError},
    services::{CogStateRegistry, ExtensionCatalog},
};
use crate::command::{
    domain::{CommandDescriptor, CommandError, CommandResult, InvocationContext},
    ports::CommandHandler,
    services::{CommandRegistry, Dispatcher},
};
use crate::gateway::{
    adapters::{RecordingTransport, StaticPermissions},
    domain::{Author, BotIdentity, Capability, ChannelId, GuildId, Message, MessageId, UserId},
};
use crate::prefix::{
    domain::Prefix,
    services::{PrefixCache, PrefixResolver},
};
use crate::response::{
    adapters::InMemoryPasteBin, domain::Response, ports::PasteUploader,
    services::ResponseContext, services::ResponseServices,
};
use crate::settings::{
    adapters::InMemoryGuildSettings,
    domain::ContestChannels,
    ports::{GuildSettingsError, GuildSettingsRepository, GuildSettingsResult},
};

pub(crate) const GUILD: GuildId = GuildId::new(100);
pub(crate) const OTHER_GUILD: GuildId = GuildId::new(101);
pub(crate) const CHANNEL: ChannelId = ChannelId::new(200);
pub(crate) const LOG_CHANNEL: ChannelId = ChannelId::new(500);
pub(crate) const AUTHOR: UserId = UserId::new(300);
pub(crate) const OWNER: UserId = UserId::new(1);
pub(crate) const BOT_ID: u64 = 999;

static NEXT_MESSAGE: AtomicU64 = AtomicU64::new(1);

/// Instant every test clock starts at: 2024-01-01T12:00:00Z.
pub(crate) fn start_instant() -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_110_400, 0).expect("valid start instant")
}

pub(crate) fn bot_identity() -> BotIdentity {
    BotIdentity::new(UserId::new(BOT_ID), "kern")
}

fn next_message_id() -> MessageId {
    MessageId::new(NEXT_MESSAGE.fetch_add(1, Ordering::Relaxed))
}

/// A message from `ada` in [`GUILD`].
pub(crate) fn guild_message(content: &str) -> Message {
    message_from(Author::new(AUTHOR, "ada"), Some(GUILD), content)
}

/// A direct message from `ada`.
pub(crate) fn direct_message(content: &str) -> Message {
    message_from(Author::new(AUTHOR, "ada"), None, content)
}

/// A message from the operator in [`GUILD`].
pub(crate) fn owner_message(content: &str) -> Message {
    message_from(Author::new(OWNER, "operator"), Some(GUILD), content)
}

pub(crate) fn message_from(author: Author, guild: Option<GuildId>, content: &str) -> Message {
    let base = Message::builder(next_message_id(), author, CHANNEL).with_content(content);
    let builder = match guild {
        Some(id) => base.in_guild(id),
        None => base,
    };
    builder.build(&ManualClock::new(start_instant()))
}

/// Deterministic clock plus response plumbing.
#[derive(Debug, Clone)]
pub(crate) struct TestBed {
    clock: Arc<ManualClock>,
}

impl TestBed {
    pub(crate) fn new() -> Self {
        Self {
            clock: Arc::new(ManualClock::new(start_instant())),
        }
    }

    pub(crate) fn clock(&self) -> &Arc<ManualClock> {
        &self.clock
    }

    pub(crate) fn shared_clock(&self) -> SharedClock {
        self.clock.clone()
    }

    pub(crate) fn start(&self) -> DateTime<Utc> {
        start_instant()
    }

    pub(crate) fn bot(&self) -> BotIdentity {
        bot_identity()
    }

    pub(crate) fn response_services_with(
        &self,
        transport: &RecordingTransport,
        uploader: Arc<dyn PasteUploader>,
    ) -> ResponseServices {
        ResponseServices::new(
            Arc::new(transport.clone()),
            uploader,
            self.shared_clock(),
            self.bot(),
        )
        .with_log_channel(LOG_CHANNEL)
    }

    pub(crate) fn response_services(&self, transport: &RecordingTransport) -> ResponseServices {
        self.response_services_with(transport, Arc::new(InMemoryPasteBin::new()))
    }
}

/// Settings repository that counts and optionally delays or fails prefix
/// lookups.
#[derive(Debug, Default)]
pub(crate) struct CountingSettings {
    inner: InMemoryGuildSettings,
    prefix_fetches: AtomicUsize,
    delay: Duration,
    failing: AtomicBool,
}

impl CountingSettings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub(crate) fn prefix_fetches(&self) -> usize {
        self.prefix_fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> GuildSettingsResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GuildSettingsError::persistence(std::io::Error::other(
                "database unreachable",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl GuildSettingsRepository for CountingSettings {
    async fn get_prefix(&self, guild: GuildId) -> GuildSettingsResult<Option<Prefix>> {
        self.prefix_fetches.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.check()?;
        self.inner.get_prefix(guild).await
    }

    async fn set_prefix(&self, guild: GuildId, prefix: &Prefix) -> GuildSettingsResult<()> {
        self.check()?;
        self.inner.set_prefix(guild, prefix).await
    }

    async fn remove_prefix(&self, guild: GuildId) -> GuildSettingsResult<()> {
        self.check()?;
        self.inner.remove_prefix(guild).await
    }

    async fn get_contest_channels(
        &self,
        guild: GuildId,
    ) -> GuildSettingsResult<Option<ContestChannels>> {
        self.check()?;
        self.inner.get_contest_channels(guild).await
    }

    async fn set_contest_channels(
        &self,
        guild: GuildId,
        channels: ContestChannels,
    ) -> GuildSettingsResult<()> {
        self.check()?;
        self.inner.set_contest_channels(guild, channels).await
    }

    async fn get_max_rating(&self, guild: GuildId) -> GuildSettingsResult<Option<u32>> {
        self.check()?;
        self.inner.get_max_rating(guild).await
    }

    async fn set_max_rating(&self, guild: GuildId, max_rating: u32) -> GuildSettingsResult<()> {
        self.check()?;
        self.inner.set_max_rating(guild, max_rating).await
    }
}

/// Handler that records the argument text of every invocation.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingHandler {
    calls: Arc<Mutex<Vec<String>>>,
    reply: Option<String>,
}

impl RecordingHandler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_owned()),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    async fn invoke(
        &self,
        invocation: &InvocationContext,
        response: &ResponseContext,
    ) -> CommandResult<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(invocation.arguments().to_owned());
        if let Some(reply) = &self.reply {
            response.success(reply.clone()).await;
        }
        Ok(())
    }
}

/// Handler that always fails with a fixed error.
#[derive(Debug, Clone)]
pub(crate) struct FailingHandler(pub(crate) CommandError);

#[async_trait]
impl CommandHandler for FailingHandler {
    async fn invoke(
        &self,
        _invocation: &InvocationContext,
        _response: &ResponseContext,
    ) -> CommandResult<()> {
        Err(self.0.clone())
    }
}

/// Handler that sleeps before succeeding.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SlowHandler(pub(crate) Duration);

#[async_trait]
impl CommandHandler for SlowHandler {
    async fn invoke(
        &self,
        _invocation: &InvocationContext,
        _response: &ResponseContext,
    ) -> CommandResult<()> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

/// Extension built from a fixed list of command names, each bound to one
/// shared recording handler. Setup can be made to fail at any time.
#[derive(Debug)]
pub(crate) struct TestExtension {
    name: CogName,
    commands: Vec<&'static str>,
    handler: RecordingHandler,
    failing: AtomicBool,
}

impl TestExtension {
    pub(crate) fn new(name: &str, commands: &[&'static str]) -> Self {
        Self {
            name: CogName::new(name).expect("valid cog name"),
            commands: commands.to_vec(),
            handler: RecordingHandler::new(),
            failing: AtomicBool::new(false),
        }
    }

    pub(crate) fn handler(&self) -> &RecordingHandler {
        &self.handler
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Extension for TestExtension {
    fn name(&self) -> &CogName {
        &self.name
    }

    fn description(&self) -> &str {
        "Commands used in tests."
    }

    fn commands(&self) -> Result<Vec<CommandDescriptor>, ExtensionError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ExtensionError::Setup("fixture told to fail".to_owned()));
        }
        self.commands
            .iter()
            .map(|name| {
                CommandDescriptor::parse(name, Arc::new(self.handler.clone()))
                    .map_err(|err| ExtensionError::Setup(err.to_string()))
            })
            .collect()
    }
}

/// The full inbound pipeline over in-memory adapters.
#[derive(Debug)]
pub(crate) struct Pipeline {
    pub(crate) bed: TestBed,
    pub(crate) transport: RecordingTransport,
    pub(crate) settings: Arc<CountingSettings>,
    pub(crate) cache: Arc<PrefixCache>,
    pub(crate) commands: Arc<CommandRegistry>,
    pub(crate) cogs: Arc<CogStateRegistry>,
    pub(crate) dispatcher: Arc<Dispatcher>,
    pub(crate) processor: MessageProcessor,
}

impl Pipeline {
    /// Builds a pipeline with global prefix `!` over `catalog`.
    pub(crate) fn new(catalog: ExtensionCatalog, permissions: StaticPermissions) -> Self {
        Self::with_timeout(catalog, permissions, crate::command::services::DEFAULT_HANDLER_TIMEOUT)
    }

    pub(crate) fn with_timeout(
        catalog: ExtensionCatalog,
        permissions: StaticPermissions,
        handler_timeout: Duration,
    ) -> Self {
        let bed = TestBed::new();
        let transport = RecordingTransport::new();
        let settings = Arc::new(CountingSettings::new());
        let cache = Arc::new(PrefixCache::new(settings.clone()));
        let commands = Arc::new(CommandRegistry::new());
        let cogs = Arc::new(CogStateRegistry::new(catalog, commands.clone()));
        let dispatcher = Arc::new(
            Dispatcher::new(
                commands.clone(),
                cogs.clone(),
                Arc::new(permissions),
                bed.shared_clock(),
                OWNER,
            )
            .with_handler_timeout(handler_timeout),
        );
        let global = Prefix::new("!").expect("valid prefix");
        let resolver = Arc::new(PrefixResolver::new(cache.clone(), global, bed.bot()));
        let executor = BatchExecutor::new(
            resolver,
            dispatcher.clone(),
            bed.response_services(&transport),
        );
        Self {
            bed,
            transport,
            settings,
            cache,
            commands,
            cogs,
            dispatcher,
            processor: MessageProcessor::new(Arc::new(executor)),
        }
    }

    /// Registers a core command bound to `handler`.
    pub(crate) fn register(&self, name: &str, handler: Arc<dyn CommandHandler>) {
        self.commands
            .register(CommandDescriptor::parse(name, handler).expect("valid command name"))
            .expect("command should register");
    }
}

/// A bot assembled by [`BotBuilder`] over recording adapters, with the
/// built-in cogs loaded.
#[derive(Debug)]
pub(crate) struct BotHarness {
    pub(crate) bed: TestBed,
    pub(crate) transport: RecordingTransport,
    pub(crate) settings: Arc<InMemoryGuildSettings>,
    pub(crate) bot: Bot,
}

/// Cogs loaded by [`BotHarness::start`].
pub(crate) const BUILTIN_COGS: [&str; 3] = ["misc", "settings", "contest"];

impl BotHarness {
    /// Builds and starts a bot where `ada` holds `grants` in [`GUILD`].
    pub(crate) async fn start(grants: &[Capability]) -> Self {
        Self::start_with(grants, |builder| builder).await
    }

    pub(crate) async fn start_with(
        grants: &[Capability],
        customise: impl FnOnce(BotBuilder) -> BotBuilder,
    ) -> Self {
        let bed = TestBed::new();
        let transport = RecordingTransport::new();
        let settings = Arc::new(InMemoryGuildSettings::new());
        let permissions = grants
            .iter()
            .fold(StaticPermissions::new(), |permissions, capability| {
                permissions.with_grant(GUILD, AUTHOR, *capability)
            });
        let builder = BotBuilder::new(Arc::new(transport.clone()), bed.bot(), OWNER)
            .with_settings(settings.clone())
            .with_permissions(Arc::new(permissions))
            .with_clock(bed.shared_clock())
            .with_log_channel(LOG_CHANNEL)
            .with_contest_seed(7)
            .with_initial_extensions(BUILTIN_COGS.iter().map(|name| (*name).to_owned()).collect());
        let bot = customise(builder).build().expect("bot should build");
        let report = bot.start().await;
        assert!(report.failed().is_empty(), "startup failures: {:?}", report.failed());
        transport.clear();
        Self {
            bed,
            transport,
            settings,
            bot,
        }
    }

    /// Sends `content` as `ada` in [`GUILD`].
    pub(crate) async fn say(&self, content: &str) -> BatchResult {
        self.bot.handle_message(&guild_message(content)).await
    }

    /// Returns the last structured response in [`CHANNEL`].
    pub(crate) fn last_response(&self) -> Response {
        self.transport
            .responses_in(CHANNEL)
            .pop()
            .expect("a response should have been sent")
    }

    /// Returns the body of the last structured response in [`CHANNEL`].
    pub(crate) fn last_body(&self) -> String {
        self.last_response()
            .body()
            .map(str::to_owned)
            .unwrap_or_default()
    }
}
