//! Compound command splitting and batch execution.
//!
//! A message such as `!a && !b && !a` is split into segments; each segment
//! is resolved and dispatched at most once per batch, failures never stop
//! later segments, and a batch with any non-executed segment gets one
//! aggregated report. Messages with a single segment go through the normal
//! single-command error path instead.
//!
//! [`services::MessageProcessor`] is the inbound entry point and serializes
//! message handling so segments of two messages never interleave.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
