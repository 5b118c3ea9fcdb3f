//! Domain errors for prefix validation.

use thiserror::Error;

/// Errors raised while validating a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefixDomainError {
    /// Nothing remained after stripping whitespace and quotes.
    #[error("prefix cannot be empty")]
    EmptyPrefix,

    /// The prefix is longer than allowed.
    #[error("prefix '{0}' is too long")]
    PrefixTooLong(String),

    /// The prefix would collide with compound command splitting.
    #[error("prefix '{0}' must not contain '&&'")]
    ContainsSeparator(String),
}
