//! Drives the bot from a terminal.
//!
//! Usage:
//!
//! ```text
//! kern --config kern.toml [--user-id 1] [--user-name operator] [--channel-id 1] [--guild-id 100]
//! ```
//!
//! Every line read from standard input is delivered as a message from the
//! given user in the given channel; replies are written to standard output.
//! `restart` rebuilds the bot from the configuration, `shutdown` and end of
//! input stop the process.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use kern::bot::services::{Bot, BotBuilder};
use kern::builtin::domain::LifecycleAction;
use kern::config::BotConfig;
use kern::contest::adapters::PostgresSubmissions;
use kern::gateway::{
    adapters::{ConsoleTransport, StaticPermissions},
    domain::{Author, ChannelId, GuildId, Message, MessageId, UserId},
};
use kern::response::adapters::HastebinUploader;
use kern::response::services::DEFAULT_UPLOAD_TIMEOUT;
use kern::settings::adapters::PostgresGuildSettings;
use mockable::DefaultClock;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "kern", about = "Run the bot against a terminal")]
struct Cli {
    /// Path to the TOML configuration.
    #[arg(long, env = "KERN_CONFIG", default_value = "kern.toml")]
    config: PathBuf,
    /// User id messages are sent as; defaults to the configured owner.
    #[arg(long)]
    user_id: Option<u64>,
    /// Display name messages are sent as.
    #[arg(long, default_value = "operator")]
    user_name: String,
    /// Channel messages are sent in.
    #[arg(long, default_value_t = 1)]
    channel_id: u64,
    /// Guild messages are sent in; omit for direct messages.
    #[arg(long)]
    guild_id: Option<u64>,
}

/// Where console input is attributed.
#[derive(Debug, Clone)]
struct Origin {
    author: Author,
    channel: ChannelId,
    guild: Option<GuildId>,
}

impl Origin {
    fn message(&self, id: u64, content: String) -> Message {
        let builder = Message::builder(MessageId::new(id), self.author.clone(), self.channel)
            .with_content(content);
        let placed = match self.guild {
            Some(guild) => builder.in_guild(guild),
            None => builder,
        };
        placed.build(&DefaultClock)
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = BotConfig::from_file(&cli.config)?;
    kern::telemetry::init(config.log_filter.as_deref())?;

    let origin = Origin {
        author: Author::new(
            UserId::new(cli.user_id.unwrap_or(config.owner_id)),
            cli.user_name.as_str(),
        ),
        channel: ChannelId::new(cli.channel_id),
        guild: cli.guild_id.map(GuildId::new),
    };
    let transport = Arc::new(ConsoleTransport::stdout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut next_id = 1_u64;

    loop {
        let bot = build_bot(&config, transport.clone()).await?;
        let report = bot.start().await;
        info!(
            loaded = report.loaded().len(),
            failed = report.failed().len(),
            "bot started"
        );
        let rotation = bot.spawn_status_rotation();

        let action = loop {
            tokio::select! {
                action = bot.lifecycle().wait() => break action,
                line = lines.next_line() => match line? {
                    Some(content) => {
                        let message = origin.message(next_id, content);
                        next_id = next_id.saturating_add(1);
                        bot.handle_message(&message).await;
                    }
                    None => break LifecycleAction::Shutdown,
                },
            }
        };
        rotation.abort();
        match action {
            LifecycleAction::Restart => info!("restarting"),
            LifecycleAction::Shutdown => {
                info!("shutting down");
                return Ok(());
            }
        }
    }
}

async fn build_bot(
    config: &BotConfig,
    transport: Arc<ConsoleTransport<tokio::io::Stdout>>,
) -> Result<Bot, BoxError> {
    let uploader = HastebinUploader::new(config.paste_base_url.as_str(), DEFAULT_UPLOAD_TIMEOUT)?;
    let base = BotBuilder::new(transport, config.bot_identity(), config.owner())
        .with_uploader(Arc::new(uploader))
        .with_permissions(Arc::new(StaticPermissions::allow_all()))
        .with_prefix(config.default_prefix.as_str())
        .with_handler_timeout(config.command_timeout())
        .with_status_messages(config.status_messages.clone())
        .with_status_interval(config.status_interval())
        .with_initial_extensions(config.initial_extensions.clone());
    let with_logs = match config.log_channel() {
        Some(channel) => base.with_log_channel(channel),
        None => base,
    };
    let builder = match config.database_url.as_deref() {
        Some(url) => with_postgres(with_logs, url).await?,
        None => {
            warn!("no database_url configured; settings and submissions are kept in memory");
            with_logs
        }
    };
    Ok(builder.build()?)
}

async fn with_postgres(builder: BotBuilder, url: &str) -> Result<BotBuilder, BoxError> {
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = tokio::task::spawn_blocking(move || Pool::builder().build(manager)).await??;
    let settings = PostgresGuildSettings::new(pool.clone());
    settings.ensure_schema().await?;
    let submissions = PostgresSubmissions::new(pool);
    submissions.ensure_schema().await?;
    info!("using postgres persistence");
    Ok(builder
        .with_settings(Arc::new(settings))
        .with_submissions(Arc::new(submissions)))
}
