//! Tests for `help`.

use rstest::rstest;

use crate::test_support::{BotHarness, owner_message};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overview_groups_visible_commands_by_cog() {
    let fx = BotHarness::start(&[]).await;

    fx.say("!help").await;

    let response = fx.last_response();
    assert_eq!(response.title(), Some("Help"));
    let body = response.body().expect("help body");
    assert!(body.starts_with("Use `!help <command>` for details on a command or cog."));
    for expected in ["**Core**", "`help`", "**misc**", "`ping`", "**contest**", "`contest`", "**settings**", "`get`"] {
        assert!(body.contains(expected), "missing {expected} in {body}");
    }
    for hidden in ["`cogs`", "`restart`", "`shutdown`"] {
        assert!(!body.contains(hidden), "{hidden} should be hidden");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn command_detail_lists_subcommands() {
    let fx = BotHarness::start(&[]).await;

    fx.say("!help contest").await;

    let body = fx.last_body();
    assert!(body.starts_with("`!contest`"));
    assert!(body.contains("**Subcommands**"));
    assert!(body.contains("`contest submit`: Enter the contest with the given text"));
    assert!(body.contains("`contest rate`"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subcommand_detail_shows_aliases() {
    let fx = BotHarness::start(&[]).await;

    fx.say("!help contest submit").await;

    assert!(fx.last_body().starts_with("`!contest submit` (aliases: enter)"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cog_detail_uses_the_description() {
    let fx = BotHarness::start(&[]).await;

    fx.say("!help misc").await;

    let body = fx.last_body();
    assert!(body.contains("**misc: Miscellaneous commands**"));
    assert!(body.contains("`ping`"));
    assert!(!body.contains("`restart`"));
}

#[rstest]
#[case("!help cogs")]
#[case("!help restart")]
#[case("!help nothing")]
#[tokio::test(flavor = "multi_thread")]
async fn hidden_and_unknown_queries_are_not_found(#[case] text: &str) {
    let fx = BotHarness::start(&[]).await;

    fx.say(text).await;

    let query = text.trim_start_matches("!help ");
    let response = fx.last_response();
    assert_eq!(response.title(), Some("Error:"));
    assert_eq!(
        response.body(),
        Some(format!("No command called \"{query}\" found.").as_str())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_cogs_drop_out_of_help() {
    let fx = BotHarness::start(&[]).await;

    fx.bot.handle_message(&owner_message("!cogs disable misc")).await;
    fx.say("!help").await;

    let body = fx.last_body();
    assert!(!body.contains("`ping`"));
    assert!(!body.contains("**misc**"));
}
