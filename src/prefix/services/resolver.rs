//! Prefix resolution for a message's origin.

use std::sync::Arc;

use super::PrefixCache;
use crate::gateway::domain::{BotIdentity, GuildId, Message};
use crate::prefix::domain::{AcceptedPrefixes, Prefix, PrefixMatch};
use crate::settings::ports::GuildSettingsResult;

/// Builds acceptance lists and matches message text against them.
#[derive(Debug, Clone)]
pub struct PrefixResolver {
    cache: Arc<PrefixCache>,
    global: Prefix,
    bot: BotIdentity,
}

impl PrefixResolver {
    /// Creates a resolver using `global` as the default prefix.
    #[must_use]
    pub const fn new(cache: Arc<PrefixCache>, global: Prefix, bot: BotIdentity) -> Self {
        Self { cache, global, bot }
    }

    /// Returns the global default prefix.
    #[must_use]
    pub const fn global(&self) -> &Prefix {
        &self.global
    }

    /// Returns the underlying cache.
    #[must_use]
    pub const fn cache(&self) -> &Arc<PrefixCache> {
        &self.cache
    }

    /// Returns the acceptance list for the message's origin.
    ///
    /// Direct messages never consult the cache.
    ///
    /// # Errors
    ///
    /// Returns the settings error when the guild's prefix cannot be loaded.
    pub async fn accepted(&self, message: &Message) -> GuildSettingsResult<AcceptedPrefixes> {
        let configured = match message.guild_id() {
            Some(guild) => self.cache.get(guild).await?,
            None => None,
        };
        Ok(AcceptedPrefixes::build(
            &self.global,
            configured.as_ref(),
            &self.bot,
        ))
    }

    /// Returns the acceptance list used when guild settings are unreachable.
    #[must_use]
    pub fn fallback(&self) -> AcceptedPrefixes {
        AcceptedPrefixes::build(&self.global, None, &self.bot)
    }

    /// Matches `text` against the acceptance list for `message`'s origin.
    ///
    /// # Errors
    ///
    /// Returns the settings error when the guild's prefix cannot be loaded.
    pub async fn resolve(
        &self,
        message: &Message,
        text: &str,
    ) -> GuildSettingsResult<Option<PrefixMatch>> {
        Ok(self.accepted(message).await?.match_text(text))
    }

    /// Returns the prefix users should type in `guild` (or in direct
    /// messages when `guild` is `None`).
    ///
    /// # Errors
    ///
    /// Returns the settings error when the guild's prefix cannot be loaded.
    pub async fn effective_prefix(&self, guild: Option<GuildId>) -> GuildSettingsResult<Prefix> {
        let configured = match guild {
            Some(guild) => self.cache.get(guild).await?,
            None => None,
        };
        Ok(configured.unwrap_or_else(|| self.global.clone()))
    }
}
