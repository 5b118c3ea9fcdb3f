//! In-memory paste bin for tests and offline runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::response::ports::{PasteError, PasteResult, PasteUploader};

/// Thread-safe paste bin keeping documents in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPasteBin {
    documents: Arc<RwLock<Vec<String>>>,
    unavailable: bool,
    latency: Option<Duration>,
}

impl InMemoryPasteBin {
    /// Creates an empty paste bin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a paste bin whose uploads always fail with a 503.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Delays every upload by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Returns the documents uploaded so far.
    #[must_use]
    pub fn documents(&self) -> Vec<String> {
        self.documents
            .read()
            .map(|documents| documents.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PasteUploader for InMemoryPasteBin {
    async fn upload(&self, text: &str) -> PasteResult<String> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.unavailable {
            return Err(PasteError::Rejected(503));
        }
        let mut documents = self
            .documents
            .write()
            .map_err(|err| PasteError::unavailable(std::io::Error::other(err.to_string())))?;
        documents.push(text.to_owned());
        Ok(format!("memory://paste/{}", documents.len()))
    }
}
