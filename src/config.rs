//! Bot configuration.
//!
//! Configuration is read from a TOML file; the auth token and database URL
//! may be overridden from the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gateway::domain::{BotIdentity, ChannelId, UserId};
use crate::prefix::domain::Prefix;

/// Environment variable overriding [`BotConfig::auth_token`].
pub const AUTH_TOKEN_VAR: &str = "AUTH_KEY";

/// Environment variable overriding [`BotConfig::database_url`].
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`BotConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Prefix used where a guild has none configured.
    #[serde(default = "default_prefix")]
    pub default_prefix: String,
    /// The operator allowed to run owner-only commands.
    pub owner_id: u64,
    /// The bot's own user id, used for mention prefixes.
    pub bot_user_id: u64,
    /// The bot's display name.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Operator-only channel for reports.
    #[serde(default)]
    pub bot_logs_channel: Option<u64>,
    /// Bounded wait applied to each handler, in seconds.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
    /// Base URL of the paste service.
    #[serde(default = "default_paste_base_url")]
    pub paste_base_url: String,
    /// Postgres URL; in-memory storage is used when absent.
    #[serde(default)]
    pub database_url: Option<String>,
    /// Transport credential.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Cogs loaded at startup.
    #[serde(default = "default_initial_extensions")]
    pub initial_extensions: Vec<String>,
    /// Presence lines rotated while running.
    #[serde(default)]
    pub status_messages: Vec<String>,
    /// Time between presence changes, in seconds.
    #[serde(default = "default_status_interval_secs")]
    pub status_interval_secs: u64,
    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_prefix() -> String {
    "!".to_owned()
}

fn default_bot_name() -> String {
    "kern".to_owned()
}

const fn default_command_timeout_secs() -> u64 {
    10
}

fn default_paste_base_url() -> String {
    "https://mystb.in".to_owned()
}

fn default_initial_extensions() -> Vec<String> {
    ["misc", "settings", "contest"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

const fn default_status_interval_secs() -> u64 {
    60
}

impl BotConfig {
    /// Loads and validates a TOML file, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] or [`ConfigError::Invalid`] when its content
    /// is unusable.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let content = std::fs::read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        Ok(Self::from_toml_str(&content)?.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Parses and validates TOML content. No environment is consulted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for unusable values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the auth token and database URL with the values `lookup`
    /// returns for [`AUTH_TOKEN_VAR`] and [`DATABASE_URL_VAR`].
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(AUTH_TOKEN_VAR) {
            self.auth_token = Some(token);
        }
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            self.database_url = Some(url);
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Prefix::new(self.default_prefix.as_str())
            .map_err(|err| ConfigError::Invalid(format!("default_prefix: {err}")))?;
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "command_timeout_secs must be greater than zero".to_owned(),
            ));
        }
        if self.status_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "status_interval_secs must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the operator.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        UserId::new(self.owner_id)
    }

    /// Returns the bot's identity.
    #[must_use]
    pub fn bot_identity(&self) -> BotIdentity {
        BotIdentity::new(UserId::new(self.bot_user_id), self.bot_name.as_str())
    }

    /// Returns the operator log channel.
    #[must_use]
    pub fn log_channel(&self) -> Option<ChannelId> {
        self.bot_logs_channel.map(ChannelId::new)
    }

    /// Returns the handler bound.
    #[must_use]
    pub const fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Returns the presence rotation interval.
    #[must_use]
    pub const fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;

    use super::{BotConfig, ConfigError};
    use crate::gateway::domain::{ChannelId, UserId};

    const MINIMAL: &str = "owner_id = 1\nbot_user_id = 999\n";

    #[rstest]
    fn minimal_config_uses_defaults() {
        let config = BotConfig::from_toml_str(MINIMAL).expect("valid config");

        assert_eq!(config.default_prefix, "!");
        assert_eq!(config.owner(), UserId::new(1));
        assert_eq!(config.bot_identity().name(), "kern");
        assert_eq!(config.command_timeout().as_secs(), 10);
        assert_eq!(config.status_interval().as_secs(), 60);
        assert_eq!(config.paste_base_url, "https://mystb.in");
        assert_eq!(config.initial_extensions, ["misc", "settings", "contest"]);
        assert_eq!(config.log_channel(), None);
        assert!(config.status_messages.is_empty());
    }

    #[rstest]
    fn full_config_is_read() {
        let content = r#"
            default_prefix = "k."
            owner_id = 1
            bot_user_id = 999
            bot_name = "judge"
            bot_logs_channel = 500
            command_timeout_secs = 5
            initial_extensions = ["misc"]
            status_messages = ["with fire"]
            status_interval_secs = 30
            log_filter = "kern=debug"
        "#;

        let config = BotConfig::from_toml_str(content).expect("valid config");

        assert_eq!(config.default_prefix, "k.");
        assert_eq!(config.log_channel(), Some(ChannelId::new(500)));
        assert_eq!(config.command_timeout().as_secs(), 5);
        assert_eq!(config.initial_extensions, ["misc"]);
        assert_eq!(config.status_messages, ["with fire"]);
        assert_eq!(config.log_filter.as_deref(), Some("kern=debug"));
    }

    #[rstest]
    #[case("bot_user_id = 999\n")]
    #[case("owner_id = \"one\"\nbot_user_id = 999\n")]
    fn malformed_config_is_a_parse_error(#[case] content: &str) {
        assert!(matches!(
            BotConfig::from_toml_str(content),
            Err(ConfigError::Parse(_))
        ));
    }

    #[rstest]
    #[case("default_prefix = \"a && b\"")]
    #[case("command_timeout_secs = 0")]
    #[case("status_interval_secs = 0")]
    fn unusable_values_are_rejected(#[case] extra: &str) {
        let content = format!("{MINIMAL}{extra}\n");

        assert!(matches!(
            BotConfig::from_toml_str(&content),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[rstest]
    fn environment_overrides_secrets() {
        let config = BotConfig::from_toml_str(&format!("{MINIMAL}auth_token = \"file\"\n"))
            .expect("valid config")
            .with_overrides(|name| match name {
                "AUTH_KEY" => Some("env-token".to_owned()),
                _ => None,
            });

        assert_eq!(config.auth_token.as_deref(), Some("env-token"));
        assert_eq!(config.database_url, None);
    }

    #[rstest]
    fn config_is_loaded_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(MINIMAL.as_bytes()).expect("write config");

        let config = BotConfig::from_file(file.path()).expect("config file");

        assert_eq!(config.bot_user_id, 999);
    }

    #[rstest]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");

        let result = BotConfig::from_file(dir.path().join("absent.toml"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
