//! Behaviour tests for compound command messages.

mod support;

#[path = "bot_steps/mod.rs"]
mod bot_steps;

use bot_steps::world::{BotWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/compound_commands.feature",
    name = "Duplicate segments run once"
)]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_segments_run_once(world: BotWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/compound_commands.feature",
    name = "Failures are summarised after every segment has run"
)]
#[tokio::test(flavor = "multi_thread")]
async fn failures_are_summarised(world: BotWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/compound_commands.feature",
    name = "A single unknown command is reported directly"
)]
#[tokio::test(flavor = "multi_thread")]
async fn single_unknown_command(world: BotWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/compound_commands.feature",
    name = "Chatter without a prefix is ignored"
)]
#[tokio::test(flavor = "multi_thread")]
async fn chatter_is_ignored(world: BotWorld) {
    let _ = world;
}
