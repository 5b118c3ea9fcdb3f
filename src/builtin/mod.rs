//! Built-in commands and extensions.
//!
//! Core commands (`help` and the operator-only `cogs` group) are registered
//! directly and never unload. The `misc`, `settings` and `contest`
//! extensions are ordinary cogs the operator can load, unload and disable.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
