//! Step definitions shared by the bot behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
