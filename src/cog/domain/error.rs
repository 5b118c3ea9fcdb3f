//! Domain errors for cog names.

use thiserror::Error;

/// Errors raised while validating a cog name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CogDomainError {
    /// The name was empty after trimming.
    #[error("cog name cannot be empty")]
    EmptyCogName,

    /// The name contained characters outside `[a-z0-9_]`.
    #[error("invalid cog name '{0}': only lowercase letters, digits and underscores are allowed")]
    InvalidCogName(String),

    /// The name exceeded the length limit.
    #[error("cog name '{0}' exceeds 64 characters")]
    CogNameTooLong(String),
}
