//! Kern: message-ingestion and command-dispatch core for a chat bot.
//!
//! The crate receives raw text messages from a real-time transport, resolves
//! the effective command prefix for the originating guild, splits compound
//! `a && b` messages into segments, executes each segment once per batch and
//! routes the outcomes back through a rich response layer.
//!
//! # Architecture
//!
//! Kern follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and rules with no infrastructure dependencies
//! - **Ports**: Trait interfaces for the transport, persistence, paste
//!   service and process lifecycle
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`,
//!   HTTP, console)
//!
//! # Modules
//!
//! - [`gateway`]: Inbound messages and the outbound chat transport
//! - [`settings`]: Per-guild settings persistence
//! - [`prefix`]: Prefix cache and resolution
//! - [`command`]: Command registry, guards and dispatch
//! - [`cog`]: Loadable command-group extensions
//! - [`response`]: Structured responses and paste offloading
//! - [`batch`]: Compound command splitting and batch execution
//! - [`contest`]: Contest submissions and ratings
//! - [`builtin`]: Built-in commands and extensions
//! - [`bot`]: Assembly of the services into a running bot

pub mod batch;
pub mod bot;
pub mod builtin;
pub mod clock;
pub mod cog;
pub mod command;
pub mod config;
pub mod contest;
pub mod gateway;
pub mod prefix;
pub mod response;
pub mod settings;
pub mod telemetry;
mod templates;

#[cfg(test)]
mod test_support;
