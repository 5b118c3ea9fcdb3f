//! Given steps for bot behaviour scenarios.

use eyre::WrapErr;
use kern::gateway::adapters::StaticPermissions;
use rstest_bdd_macros::given;

use super::world::BotWorld;
use crate::support::{Harness, run_async};

#[given("a running bot with the built-in cogs")]
fn running_bot(world: &mut BotWorld) -> Result<(), eyre::Report> {
    let harness = run_async(Harness::start(StaticPermissions::new(), |builder| builder))
        .wrap_err("start bot")?;
    world.harness = Some(harness);
    Ok(())
}
