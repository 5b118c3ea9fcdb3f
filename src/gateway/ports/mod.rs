//! Port contracts for the chat transport and permission lookups.

mod permissions;
mod transport;

pub use permissions::{PermissionError, PermissionResult, PermissionSource};
pub use transport::{ChatTransport, TransportError, TransportResult};
