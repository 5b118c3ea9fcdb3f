//! Bot assembly and background tasks.

mod assembly;
mod lifecycle;
mod runtime;
mod status;

pub use assembly::{BotBuildError, BotBuilder, DEFAULT_PREFIX};
pub use lifecycle::LifecycleSignal;
pub use runtime::Bot;
pub use status::{DEFAULT_STATUS_INTERVAL, run_status_rotation};
