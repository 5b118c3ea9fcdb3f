//! Behaviour tests for runtime cog management and guild prefixes.

mod support;

#[path = "bot_steps/mod.rs"]
mod bot_steps;

use bot_steps::world::{BotWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/cog_management.feature",
    name = "Unloading a cog removes its commands"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unloading_removes_commands(world: BotWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cog_management.feature",
    name = "Members cannot manage cogs"
)]
#[tokio::test(flavor = "multi_thread")]
async fn members_cannot_manage_cogs(world: BotWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cog_management.feature",
    name = "Reloading re-enables a disabled cog"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reloading_re_enables(world: BotWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cog_management.feature",
    name = "A guild prefix replaces the global one"
)]
#[tokio::test(flavor = "multi_thread")]
async fn guild_prefix_replaces_global(world: BotWorld) {
    let _ = world;
}
