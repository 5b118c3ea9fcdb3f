//! Port contracts for command handlers.

mod handler;

pub use handler::CommandHandler;
