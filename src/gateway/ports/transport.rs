//! Outbound transport port.

use crate::gateway::domain::{ChannelId, MessageId};
use crate::response::domain::Response;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Outbound side of the real-time chat transport.
///
/// Implementations are assumed reliable and ordered per channel. Every
/// failure is reported through [`TransportError`] and treated as non-fatal by
/// callers.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends a structured response to `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Forbidden`] when the bot may not post in the
    /// channel, [`TransportError::Rejected`] when the payload is refused and
    /// [`TransportError::Unavailable`] when the transport cannot be reached.
    async fn send_response(
        &self,
        channel: ChannelId,
        response: &Response,
    ) -> TransportResult<MessageId>;

    /// Sends plain text to `channel`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ChatTransport::send_response`].
    async fn send_text(&self, channel: ChannelId, text: &str) -> TransportResult<MessageId>;

    /// Adds `emoji` as a reaction to `message`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Forbidden`] when the bot lacks the reaction
    /// permission.
    async fn add_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
    ) -> TransportResult<()>;

    /// Removes the bot's own `emoji` reaction from `message`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Forbidden`] when the bot lacks the reaction
    /// permission.
    async fn remove_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
    ) -> TransportResult<()>;

    /// Updates the bot's presence line.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Unavailable`] when the transport cannot be
    /// reached.
    async fn set_presence(&self, activity: &str) -> TransportResult<()>;
}

/// Errors returned by transport implementations.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The bot lacks permission for the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The transport refused the payload.
    #[error("rejected by transport: {0}")]
    Rejected(String),

    /// The transport could not be reached.
    #[error("transport unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps a connectivity error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Returns `true` for permission failures.
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }
}
