//! Prefix updates with cache write-through.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::PrefixCache;
use crate::gateway::domain::GuildId;
use crate::prefix::domain::{Prefix, PrefixDomainError};
use crate::settings::ports::GuildSettingsError;

/// Service-level errors for prefix updates.
#[derive(Debug, Clone, Error)]
pub enum PrefixServiceError {
    /// The requested prefix is invalid.
    #[error(transparent)]
    Domain(#[from] PrefixDomainError),

    /// The settings repository failed.
    #[error(transparent)]
    Settings(#[from] GuildSettingsError),
}

/// Changes guild prefixes so later resolutions see them immediately.
#[derive(Debug, Clone)]
pub struct PrefixService {
    cache: Arc<PrefixCache>,
    global: Prefix,
}

impl PrefixService {
    /// Creates a prefix service over the shared cache.
    #[must_use]
    pub const fn new(cache: Arc<PrefixCache>, global: Prefix) -> Self {
        Self { cache, global }
    }

    /// Validates and stores a custom prefix for `guild`.
    ///
    /// # Errors
    ///
    /// Returns [`PrefixServiceError::Domain`] for an invalid prefix and
    /// [`PrefixServiceError::Settings`] when persistence fails.
    pub async fn set(&self, guild: GuildId, raw: &str) -> Result<Prefix, PrefixServiceError> {
        let prefix = Prefix::new(raw)?;
        self.cache.store(guild, Some(prefix.clone())).await?;
        info!(guild = %guild, prefix = %prefix, "guild prefix updated");
        Ok(prefix)
    }

    /// Clears the custom prefix for `guild`.
    ///
    /// # Errors
    ///
    /// Returns [`PrefixServiceError::Settings`] when persistence fails.
    pub async fn reset(&self, guild: GuildId) -> Result<(), PrefixServiceError> {
        self.cache.store(guild, None).await?;
        info!(guild = %guild, "guild prefix reset to default");
        Ok(())
    }

    /// Returns the prefix in effect for `guild`.
    ///
    /// # Errors
    ///
    /// Returns [`PrefixServiceError::Settings`] when persistence fails.
    pub async fn current(&self, guild: GuildId) -> Result<Prefix, PrefixServiceError> {
        Ok(self
            .cache
            .get(guild)
            .await?
            .unwrap_or_else(|| self.global.clone()))
    }
}
