//! Argument parsing and lifecycle values for built-in commands.

mod channel;
mod lifecycle;

pub use channel::parse_channel;
pub use lifecycle::LifecycleAction;
