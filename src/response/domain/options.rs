//! Per-call rendering overrides.

use crate::gateway::domain::ChannelId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum TitleChoice {
    #[default]
    AccentDefault,
    Hidden,
    Text(String),
}

/// Overrides applied on top of an accent's defaults.
///
/// # Examples
///
/// ```
/// use kern::response::domain::RenderOptions;
///
/// let options = RenderOptions::default()
///     .titled("These failed to run:")
///     .with_timestamp(false);
/// assert_eq!(options.title_for(None), Some("These failed to run:".to_owned()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    title: TitleChoice,
    footer: Option<String>,
    timestamp: Option<bool>,
    channel: Option<ChannelId>,
}

impl RenderOptions {
    /// Uses `title` instead of the accent's default title.
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = TitleChoice::Text(title.into());
        self
    }

    /// Renders without any title.
    #[must_use]
    pub fn untitled(mut self) -> Self {
        self.title = TitleChoice::Hidden;
        self
    }

    /// Uses `footer` instead of the requester footer.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Forces the timestamp on or off.
    #[must_use]
    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.timestamp = Some(enabled);
        self
    }

    /// Sends to `channel` instead of the origin channel.
    #[must_use]
    pub fn in_channel(mut self, channel: ChannelId) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Resolves the title against the accent default.
    #[must_use]
    pub fn title_for(&self, accent_default: Option<&str>) -> Option<String> {
        match &self.title {
            TitleChoice::AccentDefault => accent_default.map(str::to_owned),
            TitleChoice::Hidden => None,
            TitleChoice::Text(text) => Some(text.clone()),
        }
    }

    /// Returns the explicit footer, if any.
    #[must_use]
    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    /// Resolves the timestamp flag against the accent default.
    #[must_use]
    pub fn timestamp_or(&self, accent_default: bool) -> bool {
        self.timestamp.unwrap_or(accent_default)
    }

    /// Returns the channel override, if any.
    #[must_use]
    pub const fn channel(&self) -> Option<ChannelId> {
        self.channel
    }
}
