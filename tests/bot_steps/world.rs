//! Shared world state for bot behaviour scenarios.

use kern::batch::domain::BatchResult;
use rstest::fixture;

use crate::support::Harness;

/// Scenario world holding the running bot and the last batch result.
#[derive(Default)]
pub struct BotWorld {
    pub harness: Option<Harness>,
    pub last_result: Option<BatchResult>,
}

impl BotWorld {
    /// Returns the running bot or fails the step.
    pub fn harness(&self) -> eyre::Result<&Harness> {
        self.harness
            .as_ref()
            .ok_or_else(|| eyre::eyre!("the bot has not been started"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BotWorld {
    BotWorld::default()
}
