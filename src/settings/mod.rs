//! Per-guild settings persistence.
//!
//! Each guild row stores its custom prefix, the contest receive/vote
//! channels and the maximum contest rating. Access goes through the
//! [`ports::GuildSettingsRepository`] port so the prefix cache and the
//! contest service never depend on a storage engine.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
