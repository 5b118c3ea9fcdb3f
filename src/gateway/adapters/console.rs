//! Line-oriented transport that writes everything to a byte sink.
//!
//! Used by the `kern` binary to drive the bot from a terminal.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::gateway::{
    domain::{ChannelId, MessageId},
    ports::{ChatTransport, TransportError, TransportResult},
};
use crate::response::domain::Response;

/// Transport printing outbound traffic as plain text.
#[derive(Debug)]
pub struct ConsoleTransport<W> {
    sink: Mutex<W>,
    next_message_id: AtomicU64,
}

impl ConsoleTransport<tokio::io::Stdout> {
    /// Creates a transport writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> ConsoleTransport<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Creates a transport writing to `sink`.
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
            next_message_id: AtomicU64::new(1),
        }
    }

    /// Consumes the transport and returns the sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    async fn write_block(&self, block: &str) -> TransportResult<MessageId> {
        let mut sink = self.sink.lock().await;
        sink.write_all(block.as_bytes())
            .await
            .map_err(TransportError::unavailable)?;
        sink.write_all(b"\n").await.map_err(TransportError::unavailable)?;
        sink.flush().await.map_err(TransportError::unavailable)?;
        Ok(MessageId::new(
            self.next_message_id.fetch_add(1, Ordering::Relaxed),
        ))
    }
}

#[async_trait]
impl<W> ChatTransport for ConsoleTransport<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send_response(
        &self,
        channel: ChannelId,
        response: &Response,
    ) -> TransportResult<MessageId> {
        self.write_block(&format!("[#{channel}] {}", response.to_plain_text()))
            .await
    }

    async fn send_text(&self, channel: ChannelId, text: &str) -> TransportResult<MessageId> {
        self.write_block(&format!("[#{channel}] {text}")).await
    }

    async fn add_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
    ) -> TransportResult<()> {
        self.write_block(&format!("[#{channel}] +{emoji} on {message}"))
            .await
            .map(drop)
    }

    async fn remove_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
    ) -> TransportResult<()> {
        self.write_block(&format!("[#{channel}] -{emoji} on {message}"))
            .await
            .map(drop)
    }

    async fn set_presence(&self, activity: &str) -> TransportResult<()> {
        self.write_block(&format!("[presence] {activity}"))
            .await
            .map(drop)
    }
}
