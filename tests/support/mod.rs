//! Shared harness for integration and behaviour tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use kern::bot::services::{Bot, BotBuilder};
use kern::clock::ManualClock;
use kern::gateway::{
    adapters::{RecordingTransport, StaticPermissions},
    domain::{Author, BotIdentity, ChannelId, GuildId, Message, MessageId, UserId},
};
use kern::response::domain::Response;

/// Guild every scenario runs in.
pub const GUILD: GuildId = GuildId::new(100);
/// Channel members talk in.
pub const CHANNEL: ChannelId = ChannelId::new(200);
/// Operator-only log channel.
pub const LOG_CHANNEL: ChannelId = ChannelId::new(500);
/// A regular member.
pub const MEMBER: UserId = UserId::new(300);
/// The operator.
pub const OWNER: UserId = UserId::new(1);

static NEXT_MESSAGE: AtomicU64 = AtomicU64::new(1);

/// 2024-01-01T12:00:00Z.
pub fn start_instant() -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_110_400, 0).unwrap_or_default()
}

/// A started bot over recording adapters.
pub struct Harness {
    pub transport: RecordingTransport,
    pub clock: Arc<ManualClock>,
    pub bot: Bot,
}

impl Harness {
    /// Builds and starts a bot with the built-in cogs; `configure` may
    /// adjust the builder first.
    pub async fn start(
        permissions: StaticPermissions,
        configure: impl FnOnce(BotBuilder) -> BotBuilder,
    ) -> eyre::Result<Self> {
        let transport = RecordingTransport::new();
        let clock = Arc::new(ManualClock::new(start_instant()));
        let builder = BotBuilder::new(
            Arc::new(transport.clone()),
            BotIdentity::new(UserId::new(999), "kern"),
            OWNER,
        )
        .with_clock(clock.clone())
        .with_permissions(Arc::new(permissions))
        .with_log_channel(LOG_CHANNEL)
        .with_contest_seed(42)
        .with_initial_extensions(
            ["misc", "settings", "contest"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        );
        let bot = configure(builder).build()?;
        let report = bot.start().await;
        if !report.failed().is_empty() {
            return Err(eyre::eyre!("startup failures: {:?}", report.failed()));
        }
        transport.clear();
        Ok(Self {
            transport,
            clock,
            bot,
        })
    }

    /// Sends `content` as a member in [`GUILD`].
    pub async fn member_says(&self, content: &str) {
        self.bot
            .handle_message(&message(Author::new(MEMBER, "ada"), Some(GUILD), content))
            .await;
    }

    /// Sends `content` as the operator in [`GUILD`].
    pub async fn owner_says(&self, content: &str) {
        self.bot
            .handle_message(&message(Author::new(OWNER, "operator"), Some(GUILD), content))
            .await;
    }

    /// Structured responses sent to [`CHANNEL`].
    pub fn responses(&self) -> Vec<Response> {
        self.transport.responses_in(CHANNEL)
    }

    /// Body of the last structured response in [`CHANNEL`].
    pub fn last_body(&self) -> Option<String> {
        self.responses()
            .last()
            .and_then(|response| response.body().map(str::to_owned))
    }
}

/// Builds a message stamped at [`start_instant`].
pub fn message(author: Author, guild: Option<GuildId>, content: &str) -> Message {
    let id = MessageId::new(NEXT_MESSAGE.fetch_add(1, Ordering::Relaxed));
    let builder = Message::builder(id, author, CHANNEL).with_content(content);
    let placed = match guild {
        Some(guild_id) => builder.in_guild(guild_id),
        None => builder,
    };
    placed.build(&ManualClock::new(start_instant()))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
