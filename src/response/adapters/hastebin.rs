//! HTTP uploader for hastebin-compatible paste services.
//!
//! The service accepts `POST {base}/documents` with the raw text as the body
//! and answers `{"key": "<id>"}`; the document is then served at
//! `{base}/<id>`.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::response::ports::{PasteError, PasteResult, PasteUploader};

#[derive(Debug, Deserialize)]
struct DocumentCreated {
    key: String,
}

/// Paste uploader speaking the hastebin protocol over HTTP.
#[derive(Debug, Clone)]
pub struct HastebinUploader {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HastebinUploader {
    /// Creates an uploader for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PasteError::Unavailable`] when the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> PasteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PasteError::unavailable)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout,
        })
    }

    /// Returns the service base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn document_link(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url)
    }
}

#[async_trait]
impl PasteUploader for HastebinUploader {
    async fn upload(&self, text: &str) -> PasteResult<String> {
        let response = self
            .client
            .post(format!("{}/documents", self.base_url))
            .body(text.to_owned())
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    PasteError::Timeout(self.timeout)
                } else {
                    PasteError::unavailable(err)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PasteError::Rejected(status.as_u16()));
        }

        let created: DocumentCreated = response
            .json()
            .await
            .map_err(|err| PasteError::MalformedResponse(err.to_string()))?;
        if created.key.trim().is_empty() {
            return Err(PasteError::MalformedResponse("empty document key".to_owned()));
        }
        Ok(self.document_link(created.key.trim()))
    }
}
