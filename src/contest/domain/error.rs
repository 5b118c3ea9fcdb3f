//! Contest domain errors.

use thiserror::Error;

/// Errors raised while validating contest values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContestDomainError {
    /// The value is not a six-digit submission id.
    #[error("'{0}' is not a valid submission id")]
    InvalidSubmissionId(String),
}
