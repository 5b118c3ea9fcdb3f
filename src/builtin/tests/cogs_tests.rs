//! Tests for the operator-only `cogs` group.

use rstest::rstest;

use crate::test_support::{BotHarness, owner_message};

async fn operate(fx: &BotHarness, text: &str) -> String {
    fx.bot.handle_message(&owner_message(text)).await;
    fx.last_body()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_shows_every_cog_with_its_status() {
    let fx = BotHarness::start(&[]).await;
    operate(&fx, "!cogs disable contest").await;

    fx.bot.handle_message(&owner_message("!cogs list")).await;

    let response = fx.last_response();
    assert_eq!(response.title(), Some("Cogs:"));
    let body = response.body().expect("cog list");
    assert!(body.contains("`contest`: disabled"));
    assert!(body.contains("`misc`: enabled"));
    assert!(body.contains("`settings`: enabled"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_get_no_answer() {
    let fx = BotHarness::start(&[]).await;

    fx.say("!cogs list").await;
    fx.say("!cogs unload misc").await;

    assert!(fx.transport.sent().is_empty());
    assert!(fx.bot.cogs().list().iter().all(|state| state.is_active()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unload_and_load_round_trip() {
    let fx = BotHarness::start(&[]).await;

    assert_eq!(operate(&fx, "!cogs unload misc").await, "Cog `misc` unloaded.");
    assert_eq!(operate(&fx, "!cogs remove misc").await, "Cog `misc` is already unloaded.");

    fx.say("!ping").await;
    assert_eq!(fx.last_body(), "Command `ping` is not found.");

    assert_eq!(operate(&fx, "!cogs add misc").await, "Cog `misc` loaded.");
    assert_eq!(operate(&fx, "!cogs load misc").await, "Cog `misc` is already loaded.");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disable_keeps_commands_registered_but_unrunnable() {
    let fx = BotHarness::start(&[]).await;

    assert_eq!(operate(&fx, "!cogs disable misc").await, "Cog `misc` disabled.");
    assert_eq!(operate(&fx, "!cogs disable misc").await, "Cog `misc` is already disabled.");

    fx.say("!ping").await;
    assert_eq!(fx.last_body(), "Command `ping` is not found.");
    assert!(fx.transport.texts().is_empty());

    assert_eq!(operate(&fx, "!cogs enable misc").await, "Cog `misc` enabled.");
    assert_eq!(operate(&fx, "!cogs enable misc").await, "Cog `misc` is already enabled.");
    fx.say("!ping").await;
    assert_eq!(fx.transport.texts().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_reports_success() {
    let fx = BotHarness::start(&[]).await;

    assert_eq!(
        operate(&fx, "!cogs reload settings").await,
        "Cog `settings` successfully reloaded."
    );
}

#[rstest]
#[case("!cogs load nothing", "no cog named 'nothing' exists")]
#[case("!cogs load", "missing or invalid arguments: a cog name is required")]
#[case("!cogs", "missing or invalid arguments: `cogs` needs a subcommand; see `!help cogs`")]
#[case("!cogs frobnicate", "missing or invalid arguments: `cogs` has no subcommand `frobnicate`")]
#[tokio::test(flavor = "multi_thread")]
async fn bad_requests_are_explained(#[case] text: &str, #[case] expected: &str) {
    let fx = BotHarness::start(&[]).await;

    assert_eq!(operate(&fx, text).await, expected);
    assert_eq!(fx.last_response().title(), Some("Error:"));
}
