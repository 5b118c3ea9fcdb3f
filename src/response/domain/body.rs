//! The inline body rule.

/// Longest body, in characters, that is sent inline.
pub const MAX_INLINE_BODY_CHARS: usize = 1990;

const ELLIPSIS: char = '…';

/// Returns `true` when `body` must be offloaded to the paste service.
#[must_use]
pub fn exceeds_inline_limit(body: &str) -> bool {
    body.chars().count() > MAX_INLINE_BODY_CHARS
}

/// Cuts `body` down to [`MAX_INLINE_BODY_CHARS`] characters, ending with an
/// ellipsis. Bodies already within the limit are returned unchanged.
#[must_use]
pub fn truncate_inline(body: &str) -> String {
    if !exceeds_inline_limit(body) {
        return body.to_owned();
    }
    let mut truncated: String = body.chars().take(MAX_INLINE_BODY_CHARS - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Builds the body that replaces an offloaded one.
#[must_use]
pub fn paste_link_body(link: &str) -> String {
    format!("**Output too long**: {link}")
}
