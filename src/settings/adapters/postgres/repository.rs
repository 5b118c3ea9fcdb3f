//! `PostgreSQL` repository implementation for guild settings.

use super::{
    models::ChannelColumns,
    schema::{CREATE_SERVERS_TABLE, servers},
};
use crate::gateway::domain::{ChannelId, GuildId};
use crate::prefix::domain::Prefix;
use crate::settings::{
    domain::ContestChannels,
    ports::{GuildSettingsError, GuildSettingsRepository, GuildSettingsResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by the settings adapter.
pub type SettingsPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed guild settings repository.
#[derive(Debug, Clone)]
pub struct PostgresGuildSettings {
    pool: SettingsPgPool,
}

impl PostgresGuildSettings {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SettingsPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `servers` table if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`GuildSettingsError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> GuildSettingsResult<()> {
        self.run_blocking(|connection| {
            diesel::sql_query(CREATE_SERVERS_TABLE)
                .execute(connection)
                .map_err(GuildSettingsError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> GuildSettingsResult<T>
    where
        F: FnOnce(&mut PgConnection) -> GuildSettingsResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(GuildSettingsError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(GuildSettingsError::persistence)?
    }
}

#[async_trait]
impl GuildSettingsRepository for PostgresGuildSettings {
    async fn get_prefix(&self, guild: GuildId) -> GuildSettingsResult<Option<Prefix>> {
        let server_id = to_db_id(guild.get())?;
        self.run_blocking(move |connection| {
            let stored = servers::table
                .filter(servers::server_id.eq(server_id))
                .select(servers::prefix)
                .first::<Option<String>>(connection)
                .optional()
                .map_err(GuildSettingsError::persistence)?;
            stored
                .flatten()
                .map(|raw| Prefix::new(raw).map_err(GuildSettingsError::invalid_persisted_data))
                .transpose()
        })
        .await
    }

    async fn set_prefix(&self, guild: GuildId, prefix: &Prefix) -> GuildSettingsResult<()> {
        let server_id = to_db_id(guild.get())?;
        let value = Some(prefix.as_str().to_owned());
        self.run_blocking(move |connection| {
            diesel::insert_into(servers::table)
                .values((servers::server_id.eq(server_id), servers::prefix.eq(&value)))
                .on_conflict(servers::server_id)
                .do_update()
                .set(servers::prefix.eq(&value))
                .execute(connection)
                .map_err(GuildSettingsError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn remove_prefix(&self, guild: GuildId) -> GuildSettingsResult<()> {
        let server_id = to_db_id(guild.get())?;
        self.run_blocking(move |connection| {
            diesel::update(servers::table.filter(servers::server_id.eq(server_id)))
                .set(servers::prefix.eq(None::<String>))
                .execute(connection)
                .map_err(GuildSettingsError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn get_contest_channels(
        &self,
        guild: GuildId,
    ) -> GuildSettingsResult<Option<ContestChannels>> {
        let server_id = to_db_id(guild.get())?;
        self.run_blocking(move |connection| {
            let row = servers::table
                .filter(servers::server_id.eq(server_id))
                .select(ChannelColumns::as_select())
                .first::<ChannelColumns>(connection)
                .optional()
                .map_err(GuildSettingsError::persistence)?;
            let Some(ChannelColumns {
                receive_channel_id: Some(receive),
                vote_channel_id: Some(vote),
            }) = row
            else {
                return Ok(None);
            };
            Ok(Some(ContestChannels::new(
                ChannelId::new(from_db_id(receive)?),
                ChannelId::new(from_db_id(vote)?),
            )))
        })
        .await
    }

    async fn set_contest_channels(
        &self,
        guild: GuildId,
        channels: ContestChannels,
    ) -> GuildSettingsResult<()> {
        let server_id = to_db_id(guild.get())?;
        let receive = Some(to_db_id(channels.receive().get())?);
        let vote = Some(to_db_id(channels.vote().get())?);
        self.run_blocking(move |connection| {
            diesel::insert_into(servers::table)
                .values((
                    servers::server_id.eq(server_id),
                    servers::receive_channel_id.eq(receive),
                    servers::vote_channel_id.eq(vote),
                ))
                .on_conflict(servers::server_id)
                .do_update()
                .set((
                    servers::receive_channel_id.eq(receive),
                    servers::vote_channel_id.eq(vote),
                ))
                .execute(connection)
                .map_err(GuildSettingsError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn get_max_rating(&self, guild: GuildId) -> GuildSettingsResult<Option<u32>> {
        let server_id = to_db_id(guild.get())?;
        self.run_blocking(move |connection| {
            let stored = servers::table
                .filter(servers::server_id.eq(server_id))
                .select(servers::max_rating)
                .first::<Option<i32>>(connection)
                .optional()
                .map_err(GuildSettingsError::persistence)?;
            stored
                .flatten()
                .map(|value| u32::try_from(value).map_err(GuildSettingsError::invalid_persisted_data))
                .transpose()
        })
        .await
    }

    async fn set_max_rating(&self, guild: GuildId, max_rating: u32) -> GuildSettingsResult<()> {
        let server_id = to_db_id(guild.get())?;
        let value = Some(i32::try_from(max_rating).map_err(GuildSettingsError::persistence)?);
        self.run_blocking(move |connection| {
            diesel::insert_into(servers::table)
                .values((servers::server_id.eq(server_id), servers::max_rating.eq(value)))
                .on_conflict(servers::server_id)
                .do_update()
                .set(servers::max_rating.eq(value))
                .execute(connection)
                .map_err(GuildSettingsError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn to_db_id(value: u64) -> GuildSettingsResult<i64> {
    i64::try_from(value).map_err(GuildSettingsError::persistence)
}

fn from_db_id(value: i64) -> GuildSettingsResult<u64> {
    u64::try_from(value).map_err(GuildSettingsError::invalid_persisted_data)
}
