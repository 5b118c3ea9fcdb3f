//! Structured responses and the per-invocation response context.
//!
//! Every reply leaves the bot as a [`domain::Response`] rendered with one of
//! four accents. Bodies longer than [`domain::MAX_INLINE_BODY_CHARS`] are
//! offloaded to a paste service through [`ports::PasteUploader`] and replaced
//! by a link; if the upload fails the body is truncated inline instead.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
