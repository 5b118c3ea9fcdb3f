//! Serialized inbound message processing.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use super::BatchExecutor;
use crate::batch::domain::BatchResult;
use crate::gateway::domain::Message;

/// Inbound entry point that handles one message at a time.
///
/// The lock is held from compound detection until the last segment has been
/// dispatched, so segments of different messages never interleave.
#[derive(Debug)]
pub struct MessageProcessor {
    executor: Arc<BatchExecutor>,
    gate: Mutex<()>,
}

impl MessageProcessor {
    /// Creates a processor around `executor`.
    #[must_use]
    pub fn new(executor: Arc<BatchExecutor>) -> Self {
        Self {
            executor,
            gate: Mutex::new(()),
        }
    }

    /// Returns the executor.
    #[must_use]
    pub const fn executor(&self) -> &Arc<BatchExecutor> {
        &self.executor
    }

    /// Processes `message`. Messages written by bots are ignored.
    pub async fn process(&self, message: &Message) -> BatchResult {
        if message.author().is_bot() {
            debug!(message = %message.id(), "ignoring message from a bot account");
            return BatchResult::default();
        }
        let _serialized = self.gate.lock().await;
        self.executor.execute(message).await
    }
}
