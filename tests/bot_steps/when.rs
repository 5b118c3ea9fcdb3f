//! When steps for bot behaviour scenarios.

use kern::gateway::domain::Author;
use rstest_bdd_macros::when;

use super::world::BotWorld;
use crate::support::{GUILD, MEMBER, OWNER, message, run_async};

#[when(r#"a member sends "{text}""#)]
fn member_sends(world: &mut BotWorld, text: String) -> Result<(), eyre::Report> {
    let harness = world.harness()?;
    let result = run_async(
        harness
            .bot
            .handle_message(&message(Author::new(MEMBER, "ada"), Some(GUILD), &text)),
    );
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the owner sends "{text}""#)]
fn owner_sends(world: &mut BotWorld, text: String) -> Result<(), eyre::Report> {
    let harness = world.harness()?;
    let result = run_async(
        harness
            .bot
            .handle_message(&message(Author::new(OWNER, "operator"), Some(GUILD), &text)),
    );
    world.last_result = Some(result);
    Ok(())
}
