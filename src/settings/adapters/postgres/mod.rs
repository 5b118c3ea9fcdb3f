//! `PostgreSQL` adapter for guild settings persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresGuildSettings, SettingsPgPool};
