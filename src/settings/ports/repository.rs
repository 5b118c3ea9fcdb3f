//! Repository port for guild settings.

use crate::gateway::domain::GuildId;
use crate::prefix::domain::Prefix;
use crate::settings::domain::ContestChannels;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for guild settings operations.
pub type GuildSettingsResult<T> = Result<T, GuildSettingsError>;

/// Guild settings persistence contract.
///
/// Every operation is atomic per guild row. A guild without a row behaves
/// like a guild with every setting unset.
#[async_trait]
pub trait GuildSettingsRepository: Send + Sync {
    /// Returns the guild's custom prefix, or `None` when it uses the default.
    ///
    /// # Errors
    ///
    /// Returns [`GuildSettingsError::InvalidPersistedData`] when the stored
    /// prefix is no longer valid.
    async fn get_prefix(&self, guild: GuildId) -> GuildSettingsResult<Option<Prefix>>;

    /// Stores a custom prefix, creating the guild row if needed.
    async fn set_prefix(&self, guild: GuildId, prefix: &Prefix) -> GuildSettingsResult<()>;

    /// Clears the custom prefix so the guild falls back to the default.
    async fn remove_prefix(&self, guild: GuildId) -> GuildSettingsResult<()>;

    /// Returns the contest channels, or `None` when not configured.
    async fn get_contest_channels(
        &self,
        guild: GuildId,
    ) -> GuildSettingsResult<Option<ContestChannels>>;

    /// Stores the contest channels, creating the guild row if needed.
    async fn set_contest_channels(
        &self,
        guild: GuildId,
        channels: ContestChannels,
    ) -> GuildSettingsResult<()>;

    /// Returns the maximum contest rating, or `None` when not configured.
    async fn get_max_rating(&self, guild: GuildId) -> GuildSettingsResult<Option<u32>>;

    /// Stores the maximum contest rating, creating the guild row if needed.
    async fn set_max_rating(&self, guild: GuildId, max_rating: u32) -> GuildSettingsResult<()>;
}

/// Errors returned by guild settings repositories.
#[derive(Debug, Clone, Error)]
pub enum GuildSettingsError {
    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl GuildSettingsError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
