//! The structured response payload.

use super::Accent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rendered reply, ready for the transport.
///
/// Responses serialize to JSON so contest submissions can persist the
/// embed they were posted as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    accent: Accent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    footer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
}

impl Response {
    /// Creates an empty response with the given accent.
    #[must_use]
    pub const fn new(accent: Accent) -> Self {
        Self {
            accent,
            title: None,
            body: None,
            footer: None,
            timestamp: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the footer.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Returns the accent.
    #[must_use]
    pub const fn accent(&self) -> Accent {
        self.accent
    }

    /// Returns the accent colour.
    #[must_use]
    pub const fn colour(&self) -> u32 {
        self.accent.colour()
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the body.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the footer.
    #[must_use]
    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    /// Returns the timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Flattens the response into text for plain-text transports.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut lines = Vec::new();
        if let Some(title) = &self.title {
            lines.push(format!("**{title}**"));
        }
        if let Some(body) = &self.body {
            lines.push(body.clone());
        }
        match (&self.footer, self.timestamp) {
            (Some(footer), Some(at)) => lines.push(format!("-- {footer} ({})", at.to_rfc3339())),
            (Some(footer), None) => lines.push(format!("-- {footer}")),
            (None, Some(at)) => lines.push(format!("-- {}", at.to_rfc3339())),
            (None, None) => {}
        }
        lines.join("\n")
    }
}
