//! Domain types for gateway messages.

mod capability;
mod identity;
mod ids;
mod message;

pub use capability::Capability;
pub use identity::BotIdentity;
pub use ids::{ChannelId, GuildId, MessageId, UserId};
pub use message::{Author, Message, MessageBuilder};
