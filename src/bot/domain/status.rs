//! Presence line rotation.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Picks a random presence line from a fixed set.
#[derive(Debug, Clone)]
pub struct StatusRotation {
    messages: Vec<String>,
    rng: StdRng,
}

impl StatusRotation {
    /// Creates a rotation over `messages`, drawing from an OS-seeded
    /// generator. Blank lines are dropped.
    #[must_use]
    pub fn new(messages: impl IntoIterator<Item = String>) -> Self {
        Self {
            messages: messages
                .into_iter()
                .filter(|message| !message.trim().is_empty())
                .collect(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replaces the generator with one seeded from `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Returns `true` when there is nothing to rotate through.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the configured lines.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Draws the next presence line.
    pub fn next_status(&mut self) -> Option<&str> {
        self.messages.choose(&mut self.rng).map(String::as_str)
    }
}
