//! Command error types.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while building command descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandDomainError {
    /// A qualified name had no tokens.
    #[error("command path cannot be empty")]
    EmptyCommandPath,

    /// A name or alias token was empty or contained whitespace.
    #[error("invalid command token '{0}'")]
    InvalidToken(String),
}

/// Result type for command handlers.
pub type CommandResult<T> = Result<T, CommandError>;

/// Failure reported by a command handler.
///
/// The dispatcher captures every variant into a dispatch outcome; handlers
/// never panic or propagate errors past it.
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    /// Required arguments are missing or malformed.
    #[error("missing or invalid arguments: {0}")]
    InvalidArguments(String),

    /// The handler did not finish within the bounded wait.
    #[error("timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    /// An upstream service answered with an error status.
    #[error("upstream service answered {status}: {message}")]
    Upstream {
        /// HTTP-like status code.
        status: u16,
        /// Upstream explanation.
        message: String,
    },

    /// The handler failed with a message meant for the user.
    #[error("{0}")]
    Failed(String),

    /// Persistence or transport infrastructure failed.
    #[error("infrastructure failure: {0}")]
    Infrastructure(Arc<dyn std::error::Error + Send + Sync>),

    /// Any other failure, tagged with the name of its error type.
    #[error("{category}: {message}")]
    Unclassified {
        /// Short name of the underlying error type.
        category: String,
        /// The underlying error's message.
        message: String,
    },
}

impl CommandError {
    /// Wraps an infrastructure error.
    pub fn infrastructure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Infrastructure(Arc::new(err))
    }

    /// Wraps an error that fits no other category.
    pub fn unclassified<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let full_name = std::any::type_name::<E>();
        let category = full_name
            .rsplit("::")
            .next()
            .unwrap_or(full_name)
            .to_owned();
        Self::Unclassified {
            category,
            message: err.to_string(),
        }
    }

    /// Returns `true` for failures the operator log channel should hear
    /// about.
    #[must_use]
    pub const fn is_operator_visible(&self) -> bool {
        matches!(self, Self::Infrastructure(_) | Self::Unclassified { .. })
    }

    /// Returns the short category name used in reports.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::InvalidArguments(_) => "InvalidArguments",
            Self::Timeout(_) => "Timeout",
            Self::Upstream { .. } => "Upstream",
            Self::Failed(_) => "Failed",
            Self::Infrastructure(_) => "Infrastructure",
            Self::Unclassified { category, .. } => category,
        }
    }
}
