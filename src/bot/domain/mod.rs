//! Bot-level domain values: status rotation and the startup line.

mod startup;
mod status;

pub use startup::{StartupReport, startup_announcement};
pub use status::StatusRotation;
