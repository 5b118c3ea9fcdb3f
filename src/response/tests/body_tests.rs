//! Tests for the inline body rule helpers.

use crate::response::domain::{
    Accent, MAX_INLINE_BODY_CHARS, RenderOptions, exceeds_inline_limit, truncate_inline,
};
use rstest::rstest;

#[rstest]
#[case(MAX_INLINE_BODY_CHARS - 1, false)]
#[case(MAX_INLINE_BODY_CHARS, false)]
#[case(MAX_INLINE_BODY_CHARS + 1, true)]
fn inline_limit_is_inclusive(#[case] length: usize, #[case] exceeds: bool) {
    assert_eq!(exceeds_inline_limit(&"x".repeat(length)), exceeds);
}

#[test]
fn limit_counts_characters_not_bytes() {
    let body = "é".repeat(MAX_INLINE_BODY_CHARS);
    assert!(body.len() > MAX_INLINE_BODY_CHARS);
    assert!(!exceeds_inline_limit(&body));
}

#[test]
fn truncation_ends_with_ellipsis_at_the_limit() {
    let truncated = truncate_inline(&"y".repeat(5000));

    assert_eq!(truncated.chars().count(), MAX_INLINE_BODY_CHARS);
    assert!(truncated.ends_with('…'));
}

#[test]
fn truncation_leaves_short_bodies_alone() {
    assert_eq!(truncate_inline("short"), "short");
}

#[rstest]
#[case(Accent::Error, Some("Error:"), false)]
#[case(Accent::Success, Some("Success:"), true)]
#[case(Accent::Neutral, None, true)]
#[case(Accent::Warning, None, true)]
fn accent_defaults(
    #[case] accent: Accent,
    #[case] title: Option<&str>,
    #[case] stamped: bool,
) {
    assert_eq!(accent.default_title(), title);
    assert_eq!(accent.stamps_by_default(), stamped);
}

#[test]
fn neutral_accent_uses_dark_embed_colour() {
    assert_eq!(Accent::Neutral.colour(), 0x0036_393E);
}

#[test]
fn explicit_title_overrides_accent_default() {
    let options = RenderOptions::default().titled("Custom");
    assert_eq!(options.title_for(Some("Error:")), Some("Custom".to_owned()));
    assert_eq!(RenderOptions::default().untitled().title_for(Some("Error:")), None);
}
