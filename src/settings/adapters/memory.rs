//! In-memory guild settings repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::gateway::domain::GuildId;
use crate::prefix::domain::Prefix;
use crate::settings::{
    domain::ContestChannels,
    ports::{GuildSettingsError, GuildSettingsRepository, GuildSettingsResult},
};

#[derive(Debug, Clone, Default)]
struct GuildRow {
    prefix: Option<Prefix>,
    channels: Option<ContestChannels>,
    max_rating: Option<u32>,
}

/// Thread-safe in-memory guild settings repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGuildSettings {
    rows: Arc<RwLock<HashMap<GuildId, GuildRow>>>,
}

impl InMemoryGuildSettings {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, guild: GuildId, f: impl FnOnce(&GuildRow) -> T) -> GuildSettingsResult<T>
    where
        T: Default,
    {
        let rows = self.rows.read().map_err(|err| {
            GuildSettingsError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(rows.get(&guild).map(f).unwrap_or_default())
    }

    fn write(&self, guild: GuildId, f: impl FnOnce(&mut GuildRow)) -> GuildSettingsResult<()> {
        let mut rows = self.rows.write().map_err(|err| {
            GuildSettingsError::persistence(std::io::Error::other(err.to_string()))
        })?;
        f(rows.entry(guild).or_default());
        Ok(())
    }
}

#[async_trait]
impl GuildSettingsRepository for InMemoryGuildSettings {
    async fn get_prefix(&self, guild: GuildId) -> GuildSettingsResult<Option<Prefix>> {
        self.read(guild, |row| row.prefix.clone())
    }

    async fn set_prefix(&self, guild: GuildId, prefix: &Prefix) -> GuildSettingsResult<()> {
        let prefix = prefix.clone();
        self.write(guild, |row| row.prefix = Some(prefix))
    }

    async fn remove_prefix(&self, guild: GuildId) -> GuildSettingsResult<()> {
        self.write(guild, |row| row.prefix = None)
    }

    async fn get_contest_channels(
        &self,
        guild: GuildId,
    ) -> GuildSettingsResult<Option<ContestChannels>> {
        self.read(guild, |row| row.channels)
    }

    async fn set_contest_channels(
        &self,
        guild: GuildId,
        channels: ContestChannels,
    ) -> GuildSettingsResult<()> {
        self.write(guild, |row| row.channels = Some(channels))
    }

    async fn get_max_rating(&self, guild: GuildId) -> GuildSettingsResult<Option<u32>> {
        self.read(guild, |row| row.max_rating)
    }

    async fn set_max_rating(&self, guild: GuildId, max_rating: u32) -> GuildSettingsResult<()> {
        self.write(guild, |row| row.max_rating = Some(max_rating))
    }
}
