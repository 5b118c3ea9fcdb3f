//! Paste upload port.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for paste uploads.
pub type PasteResult<T> = Result<T, PasteError>;

/// Uploads oversized text and returns a shareable link.
#[async_trait]
pub trait PasteUploader: Send + Sync {
    /// Uploads `text` and returns the link to it.
    ///
    /// # Errors
    ///
    /// Returns [`PasteError`] when the service is unreachable, refuses the
    /// document, answers with an unexpected payload or does not answer in
    /// time.
    async fn upload(&self, text: &str) -> PasteResult<String>;
}

/// Errors returned by paste uploaders.
#[derive(Debug, Clone, Error)]
pub enum PasteError {
    /// The upload did not finish within the bounded wait.
    #[error("paste upload timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-success status.
    #[error("paste service rejected the upload with status {0}")]
    Rejected(u16),

    /// The service answered with a payload we could not understand.
    #[error("malformed paste service response: {0}")]
    MalformedResponse(String),

    /// The service could not be reached.
    #[error("paste service unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl PasteError {
    /// Wraps a connectivity error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
