//! Per-invocation response context.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::clock::SharedClock;
use crate::gateway::{
    domain::{BotIdentity, ChannelId, Message, MessageId},
    ports::ChatTransport,
};
use crate::response::{
    domain::{
        Accent, RenderOptions, Response, exceeds_inline_limit, paste_link_body, truncate_inline,
    },
    ports::{PasteError, PasteUploader},
};

/// Bounded wait applied to paste uploads.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Collaborators shared by every response context.
///
/// Cloning is cheap; all collaborators are reference counted.
#[derive(Clone)]
pub struct ResponseServices {
    transport: Arc<dyn ChatTransport>,
    uploader: Arc<dyn PasteUploader>,
    clock: SharedClock,
    bot: BotIdentity,
    log_channel: Option<ChannelId>,
    upload_timeout: Duration,
}

impl fmt::Debug for ResponseServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseServices")
            .field("bot", &self.bot)
            .field("log_channel", &self.log_channel)
            .field("upload_timeout", &self.upload_timeout)
            .finish_non_exhaustive()
    }
}

impl ResponseServices {
    /// Creates the shared response collaborators.
    #[must_use]
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        uploader: Arc<dyn PasteUploader>,
        clock: SharedClock,
        bot: BotIdentity,
    ) -> Self {
        Self {
            transport,
            uploader,
            clock,
            bot,
            log_channel: None,
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    /// Sets the operator-only log channel.
    #[must_use]
    pub const fn with_log_channel(mut self, channel: ChannelId) -> Self {
        self.log_channel = Some(channel);
        self
    }

    /// Overrides the paste upload bound.
    #[must_use]
    pub const fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn ChatTransport> {
        &self.transport
    }

    /// Returns the clock.
    #[must_use]
    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Returns the bot identity.
    #[must_use]
    pub const fn bot(&self) -> &BotIdentity {
        &self.bot
    }

    /// Returns the operator-only log channel, if configured.
    #[must_use]
    pub const fn log_channel(&self) -> Option<ChannelId> {
        self.log_channel
    }

    /// Creates the context for replying to `origin`.
    #[must_use]
    pub fn context_for(&self, origin: &Message, prefix: Option<String>) -> ResponseContext {
        ResponseContext {
            services: self.clone(),
            origin: origin.clone(),
            prefix,
        }
    }

    /// Applies the inline body rule.
    ///
    /// Bodies over the inline limit are uploaded and replaced by a link. A
    /// failed or slow upload falls back to a truncated inline body.
    pub async fn prepare_body(&self, body: String) -> String {
        if !exceeds_inline_limit(&body) {
            return body;
        }
        let upload = tokio::time::timeout(self.upload_timeout, self.uploader.upload(&body));
        let outcome = match upload.await {
            Ok(result) => result,
            Err(_) => Err(PasteError::Timeout(self.upload_timeout)),
        };
        match outcome {
            Ok(link) => paste_link_body(&link),
            Err(err) => {
                warn!(error = %err, "paste upload failed; truncating body inline");
                truncate_inline(&body)
            }
        }
    }

    /// Sends `response` to `channel`, logging transport failures.
    pub async fn deliver(&self, channel: ChannelId, response: &Response) -> Option<MessageId> {
        match self.transport.send_response(channel, response).await {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(channel = %channel, error = %err, "response could not be delivered");
                None
            }
        }
    }

    /// Posts `response` to the operator log channel, if one is configured.
    pub async fn report_to_operators(&self, response: Response) -> Option<MessageId> {
        let Some(channel) = self.log_channel else {
            debug!("no operator log channel configured; dropping report");
            return None;
        };
        let oversized = response
            .body()
            .filter(|body| exceeds_inline_limit(body))
            .map(str::to_owned);
        let response = match oversized {
            Some(body) => {
                let body = self.prepare_body(body).await;
                response.with_body(body)
            }
            None => response,
        };
        self.deliver(channel, &response).await
    }
}

/// Rendering surface handed to a command for one invocation.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    services: ResponseServices,
    origin: Message,
    prefix: Option<String>,
}

impl ResponseContext {
    /// Returns the message being answered.
    #[must_use]
    pub const fn origin(&self) -> &Message {
        &self.origin
    }

    /// Returns the origin channel.
    #[must_use]
    pub const fn channel(&self) -> ChannelId {
        self.origin.channel_id()
    }

    /// Returns the prefix the invocation was matched with.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns the shared collaborators.
    #[must_use]
    pub const fn services(&self) -> &ResponseServices {
        &self.services
    }

    /// Returns the matched prefix as users should type it, replacing a
    /// self-mention with `@name`.
    #[must_use]
    pub fn clean_prefix(&self) -> String {
        let Some(prefix) = self.prefix.as_deref() else {
            return String::new();
        };
        let bot = self.services.bot();
        let mention = format!("@{}", bot.name());
        bot.mention_forms()
            .iter()
            .fold(prefix.to_owned(), |cleaned, form| cleaned.replace(form, &mention))
    }

    /// Sends an error response with default options.
    pub async fn error(&self, body: impl Into<String> + Send) -> Option<MessageId> {
        self.render(Accent::Error, body.into(), RenderOptions::default())
            .await
    }

    /// Sends an error response with `options` applied.
    pub async fn error_with(
        &self,
        body: impl Into<String> + Send,
        options: RenderOptions,
    ) -> Option<MessageId> {
        self.render(Accent::Error, body.into(), options).await
    }

    /// Sends a success response with default options.
    pub async fn success(&self, body: impl Into<String> + Send) -> Option<MessageId> {
        self.render(Accent::Success, body.into(), RenderOptions::default())
            .await
    }

    /// Sends a success response with `options` applied.
    pub async fn success_with(
        &self,
        body: impl Into<String> + Send,
        options: RenderOptions,
    ) -> Option<MessageId> {
        self.render(Accent::Success, body.into(), options).await
    }

    /// Sends a neutral response with default options.
    pub async fn neutral(&self, body: impl Into<String> + Send) -> Option<MessageId> {
        self.render(Accent::Neutral, body.into(), RenderOptions::default())
            .await
    }

    /// Sends a neutral response with `options` applied.
    pub async fn neutral_with(
        &self,
        body: impl Into<String> + Send,
        options: RenderOptions,
    ) -> Option<MessageId> {
        self.render(Accent::Neutral, body.into(), options).await
    }

    /// Sends a warning response with default options.
    pub async fn warning(&self, body: impl Into<String> + Send) -> Option<MessageId> {
        self.render(Accent::Warning, body.into(), RenderOptions::default())
            .await
    }

    /// Sends a warning response with `options` applied.
    pub async fn warning_with(
        &self,
        body: impl Into<String> + Send,
        options: RenderOptions,
    ) -> Option<MessageId> {
        self.render(Accent::Warning, body.into(), options).await
    }

    /// Builds the response for `accent` without sending it.
    pub async fn compose(&self, accent: Accent, body: String, options: &RenderOptions) -> Response {
        let mut response = Response::new(accent);
        if let Some(title) = options.title_for(accent.default_title()) {
            response = response.with_title(title);
        }
        if !body.is_empty() {
            response = response.with_body(self.services.prepare_body(body).await);
        }
        let stamped = options.timestamp_or(accent.stamps_by_default());
        match options.footer() {
            Some(footer) => response = response.with_footer(footer),
            None if stamped => {
                response = response.with_footer(format!(
                    "Requested by: {}",
                    self.origin.author().name()
                ));
            }
            None => {}
        }
        if stamped {
            response = response.with_timestamp(self.services.clock().utc());
        }
        response
    }

    /// Builds and sends a response.
    pub async fn render(
        &self,
        accent: Accent,
        body: String,
        options: RenderOptions,
    ) -> Option<MessageId> {
        let response = self.compose(accent, body, &options).await;
        let channel = options.channel().unwrap_or_else(|| self.channel());
        self.services.deliver(channel, &response).await
    }

    /// Sends plain text to the origin channel, applying the inline body rule.
    pub async fn send_text(&self, text: impl Into<String> + Send) -> Option<MessageId> {
        let text = self.services.prepare_body(text.into()).await;
        match self
            .services
            .transport()
            .send_text(self.channel(), &text)
            .await
        {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(channel = %self.channel(), error = %err, "text could not be delivered");
                None
            }
        }
    }

    /// Reacts to the origin message.
    ///
    /// Missing reaction permission is ignored silently.
    pub async fn add_reaction(&self, emoji: &str) {
        let result = self
            .services
            .transport()
            .add_reaction(self.channel(), self.origin.id(), emoji)
            .await;
        match result {
            Ok(()) => {}
            Err(err) if err.is_forbidden() => {}
            Err(err) => warn!(emoji, error = %err, "reaction could not be added"),
        }
    }

    /// Removes the bot's reaction from the origin message.
    ///
    /// Missing reaction permission is ignored silently.
    pub async fn remove_reaction(&self, emoji: &str) {
        let result = self
            .services
            .transport()
            .remove_reaction(self.channel(), self.origin.id(), emoji)
            .await;
        match result {
            Ok(()) => {}
            Err(err) if err.is_forbidden() => {}
            Err(err) => warn!(emoji, error = %err, "reaction could not be removed"),
        }
    }
}
