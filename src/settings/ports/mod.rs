//! Port contracts for guild settings persistence.

pub mod repository;

pub use repository::{GuildSettingsError, GuildSettingsRepository, GuildSettingsResult};
