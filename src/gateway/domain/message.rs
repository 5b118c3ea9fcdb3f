//! Inbound chat message.

use super::{ChannelId, GuildId, MessageId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// The user who sent a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    id: UserId,
    name: String,
    bot: bool,
}

impl Author {
    /// Creates a human author.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bot: false,
        }
    }

    /// Creates an author that is itself a bot account.
    #[must_use]
    pub fn bot(id: UserId, name: impl Into<String>) -> Self {
        Self {
            bot: true,
            ..Self::new(id, name)
        }
    }

    /// Returns the author's user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the author's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` when the author is a bot account.
    #[must_use]
    pub const fn is_bot(&self) -> bool {
        self.bot
    }
}

/// An immutable message delivered by the transport.
///
/// The dispatch core never mutates a message; compound splitting produces
/// derived copies through [`Message::with_content`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    author: Author,
    channel_id: ChannelId,
    guild_id: Option<GuildId>,
    content: String,
    created_at: DateTime<Utc>,
}

impl Message {
    /// Returns a builder for a message sent by `author` in `channel_id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kern::gateway::domain::{Author, ChannelId, GuildId, Message, MessageId, UserId};
    /// use mockable::DefaultClock;
    ///
    /// let message = Message::builder(
    ///     MessageId::new(1),
    ///     Author::new(UserId::new(7), "ada"),
    ///     ChannelId::new(3),
    /// )
    /// .in_guild(GuildId::new(9))
    /// .with_content("!ping")
    /// .build(&DefaultClock);
    ///
    /// assert_eq!(message.content(), "!ping");
    /// assert!(!message.is_direct());
    /// ```
    #[must_use]
    pub fn builder(id: MessageId, author: Author, channel_id: ChannelId) -> MessageBuilder {
        MessageBuilder {
            id,
            author,
            channel_id,
            guild_id: None,
            content: String::new(),
            created_at: None,
        }
    }

    /// Returns a copy of this message carrying different content.
    #[must_use]
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> &Author {
        &self.author
    }

    /// Returns the channel the message was posted in.
    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Returns the guild the message was posted in, if any.
    #[must_use]
    pub const fn guild_id(&self) -> Option<GuildId> {
        self.guild_id
    }

    /// Returns `true` for direct messages (no guild).
    #[must_use]
    pub const fn is_direct(&self) -> bool {
        self.guild_id.is_none()
    }

    /// Returns the raw message text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Builder for [`Message`].
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    id: MessageId,
    author: Author,
    channel_id: ChannelId,
    guild_id: Option<GuildId>,
    content: String,
    created_at: Option<DateTime<Utc>>,
}

impl MessageBuilder {
    /// Marks the message as posted inside `guild_id`.
    #[must_use]
    pub fn in_guild(mut self, guild_id: GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    /// Sets the message text.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Pins the creation timestamp instead of reading the clock.
    #[must_use]
    pub fn created_at(mut self, instant: DateTime<Utc>) -> Self {
        self.created_at = Some(instant);
        self
    }

    /// Builds the message, stamping it with the clock's current time unless
    /// a timestamp was pinned.
    #[must_use]
    pub fn build(self, clock: &(impl Clock + ?Sized)) -> Message {
        Message {
            id: self.id,
            author: self.author,
            channel_id: self.channel_id,
            guild_id: self.guild_id,
            content: self.content,
            created_at: self.created_at.unwrap_or_else(|| clock.utc()),
        }
    }
}
