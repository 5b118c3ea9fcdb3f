//! Prefix domain types.

mod accepted;
mod error;
mod prefix;

pub use accepted::{AcceptedPrefixes, PrefixMatch};
pub use error::PrefixDomainError;
pub use prefix::{MAX_PREFIX_CHARS, Prefix};
