//! The bot's own account identity.

use super::UserId;

/// Who the bot is on the transport.
///
/// Used for self-mention prefixes and for rendering prefixes back to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    id: UserId,
    name: String,
}

impl BotIdentity {
    /// Creates a bot identity.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the bot's user id.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the bot's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the mention forms that address the bot directly.
    #[must_use]
    pub fn mention_forms(&self) -> [String; 2] {
        [format!("<@{}>", self.id), format!("<@!{}>", self.id)]
    }
}
