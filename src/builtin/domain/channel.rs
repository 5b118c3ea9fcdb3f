//! Channel references typed by users.

use crate::gateway::domain::ChannelId;

/// Parses a channel mention (`<#123>`) or a bare channel id.
///
/// # Examples
///
/// ```
/// use kern::builtin::domain::parse_channel;
/// use kern::gateway::domain::ChannelId;
///
/// assert_eq!(parse_channel("<#42>"), Some(ChannelId::new(42)));
/// assert_eq!(parse_channel("42"), Some(ChannelId::new(42)));
/// assert_eq!(parse_channel("#general"), None);
/// ```
#[must_use]
pub fn parse_channel(token: &str) -> Option<ChannelId> {
    let trimmed = token.trim();
    let raw = trimmed
        .strip_prefix("<#")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(trimmed);
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok().map(ChannelId::new)
}
