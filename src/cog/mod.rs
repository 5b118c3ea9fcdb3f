//! Loadable command-group extensions ("cogs").
//!
//! An [`ports::Extension`] contributes a named group of commands. The
//! [`services::CogStateRegistry`] loads, unloads, enables, disables and
//! reloads extensions at runtime, registering and removing their commands
//! in the shared command registry, and tells the dispatcher which cogs are
//! currently active.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
