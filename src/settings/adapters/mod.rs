//! Adapter implementations for guild settings persistence.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryGuildSettings;
pub use postgres::{PostgresGuildSettings, SettingsPgPool};
