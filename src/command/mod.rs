//! Command registry, guards and dispatch.
//!
//! Commands are described by [`domain::CommandDescriptor`] values keyed by a
//! normalized [`domain::CommandPath`] in the [`services::CommandRegistry`].
//! The [`services::Dispatcher`] resolves command text against the registry,
//! runs the guard pipeline (ownership, permission, cooldown) and invokes the
//! handler under a bounded wait, folding every result into a
//! [`services::DispatchOutcome`].

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
