//! Prefix resolution for inbound messages.
//!
//! Guild prefixes live in an injectable [`services::PrefixCache`] that loads
//! them lazily from the guild settings repository with single-flight
//! semantics. The [`services::PrefixResolver`] turns a message's origin into
//! an [`domain::AcceptedPrefixes`] list and matches text against it, and
//! [`services::PrefixService`] writes prefix changes through the cache.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
