//! Assembly of the services into a running bot.
//!
//! [`services::BotBuilder`] wires the transport, persistence and paste ports
//! into the prefix, command, cog and batch services, registers the core
//! commands and the built-in extensions, and returns a [`services::Bot`]
//! whose [`services::Bot::handle_message`] is the single inbound entry point.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
