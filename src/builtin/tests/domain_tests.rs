//! Tests for channel parsing and lifecycle actions.

use rstest::rstest;

use crate::builtin::domain::{LifecycleAction, parse_channel};
use crate::gateway::domain::ChannelId;

#[rstest]
#[case("<#42>", Some(42))]
#[case("42", Some(42))]
#[case(" <#7> ", Some(7))]
#[case("<#>", None)]
#[case("<@42>", None)]
#[case("#42", None)]
#[case("general", None)]
fn channels_parse_from_mentions_and_ids(#[case] raw: &str, #[case] expected: Option<u64>) {
    assert_eq!(parse_channel(raw), expected.map(ChannelId::new));
}

#[rstest]
#[case(LifecycleAction::Restart, "restart", "Restarting bot.")]
#[case(LifecycleAction::Shutdown, "shutdown", "Shutting down bot.")]
fn lifecycle_actions_name_and_announce(
    #[case] action: LifecycleAction,
    #[case] name: &str,
    #[case] announcement: &str,
) {
    assert_eq!(action.to_string(), name);
    assert_eq!(action.announcement(), announcement);
}
