//! Adapter implementations for the gateway ports.

pub mod console;
pub mod memory;

pub use console::ConsoleTransport;
pub use memory::{Outbound, RecordedReaction, RecordingTransport, StaticPermissions};
