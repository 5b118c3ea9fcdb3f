//! Gateway boundary: inbound messages and the outbound chat transport.
//!
//! The real-time transport delivers [`domain::Message`] values and accepts
//! structured responses, plain text and reactions through the
//! [`ports::ChatTransport`] port. Permission lookups for the origin context
//! go through [`ports::PermissionSource`].

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
