//! Port contracts for built-in commands.

mod lifecycle;

pub use lifecycle::{LifecycleControl, LifecycleError};
