//! Command registry, cooldown tracking and dispatch.

mod cooldown;
mod dispatcher;
mod registry;

pub use cooldown::{CooldownReservation, CooldownTracker};
pub use dispatcher::{CogGate, DEFAULT_HANDLER_TIMEOUT, DispatchOutcome, Dispatcher};
pub use registry::{CommandRegistry, CommandRegistryError, ResolvedCommand};
