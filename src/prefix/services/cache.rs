//! Single-flight prefix cache.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use crate::gateway::domain::GuildId;
use crate::prefix::domain::Prefix;
use crate::settings::ports::{GuildSettingsRepository, GuildSettingsResult};

type Flight = Arc<tokio::sync::Mutex<()>>;

/// Process-wide map from guild to configured prefix.
///
/// Entries are loaded from the settings repository on first use. Concurrent
/// lookups for the same uncached guild share one per-guild lock and re-check
/// the cache after acquiring it, so only one fetch is ever in flight. Writes
/// go through the same lock and overwrite the entry only after persistence
/// acknowledged them.
pub struct PrefixCache {
    repository: Arc<dyn GuildSettingsRepository>,
    entries: RwLock<HashMap<GuildId, Option<Prefix>>>,
    flights: Mutex<HashMap<GuildId, Flight>>,
}

impl fmt::Debug for PrefixCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixCache")
            .field("cached_guilds", &self.len())
            .finish_non_exhaustive()
    }
}

impl PrefixCache {
    /// Creates an empty cache over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn GuildSettingsRepository>) -> Self {
        Self {
            repository,
            entries: RwLock::new(HashMap::new()),
            flights: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the guild's configured prefix, loading it on a miss.
    ///
    /// `Ok(None)` means the guild uses the global default.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the fetch fails; nothing is cached
    /// in that case.
    pub async fn get(&self, guild: GuildId) -> GuildSettingsResult<Option<Prefix>> {
        if let Some(entry) = self.cached(guild) {
            return Ok(entry);
        }

        let flight = self.flight_for(guild);
        let fetched = {
            let _in_flight = flight.lock().await;
            self.load(guild).await
        };
        self.land(guild, &flight);
        fetched
    }

    /// Persists `prefix` for `guild` and then overwrites the cache entry.
    ///
    /// `None` clears the custom prefix.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the write fails; the cache entry is
    /// left untouched in that case.
    pub async fn store(&self, guild: GuildId, prefix: Option<Prefix>) -> GuildSettingsResult<()> {
        let flight = self.flight_for(guild);
        let stored = {
            let _in_flight = flight.lock().await;
            self.persist(guild, prefix).await
        };
        self.land(guild, &flight);
        stored
    }

    /// Drops the cached entry so the next lookup refetches it.
    pub fn invalidate(&self, guild: GuildId) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&guild);
    }

    /// Returns the number of cached guilds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached(&self, guild: GuildId) -> Option<Option<Prefix>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&guild)
            .cloned()
    }

    async fn load(&self, guild: GuildId) -> GuildSettingsResult<Option<Prefix>> {
        if let Some(entry) = self.cached(guild) {
            return Ok(entry);
        }
        debug!(guild = %guild, "prefix cache miss; fetching from settings");
        let fetched = self.repository.get_prefix(guild).await?;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(guild, fetched.clone());
        Ok(fetched)
    }

    async fn persist(&self, guild: GuildId, prefix: Option<Prefix>) -> GuildSettingsResult<()> {
        match &prefix {
            Some(configured) => self.repository.set_prefix(guild, configured).await?,
            None => self.repository.remove_prefix(guild).await?,
        }
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(guild, prefix);
        Ok(())
    }

    /// Number of per-guild locks currently held or awaited.
    #[cfg(test)]
    pub(crate) fn flights_in_use(&self) -> usize {
        self.flights
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drops the per-guild lock once nobody else holds or awaits it.
    fn land(&self, guild: GuildId, flight: &Flight) {
        let mut flights = self.flights.lock().unwrap_or_else(PoisonError::into_inner);
        // Clones are only handed out under this lock: the map and `flight`.
        if Arc::strong_count(flight) == 2 {
            flights.remove(&guild);
        }
    }

    fn flight_for(&self, guild: GuildId) -> Flight {
        Arc::clone(
            self.flights
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(guild)
                .or_default(),
        )
    }
}
