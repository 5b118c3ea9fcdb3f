//! In-memory transport and permission adapters.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::gateway::{
    domain::{Capability, ChannelId, GuildId, MessageId, UserId},
    ports::{PermissionResult, PermissionSource, ChatTransport, TransportError, TransportResult},
};
use crate::response::domain::Response;

/// A payload captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// A structured response.
    Response {
        /// Destination channel.
        channel: ChannelId,
        /// The response sent.
        response: Response,
    },
    /// A plain-text message.
    Text {
        /// Destination channel.
        channel: ChannelId,
        /// The text sent.
        text: String,
    },
}

impl Outbound {
    /// Returns the destination channel.
    #[must_use]
    pub const fn channel(&self) -> ChannelId {
        match self {
            Self::Response { channel, .. } | Self::Text { channel, .. } => *channel,
        }
    }

    /// Returns the structured response, if this is one.
    #[must_use]
    pub const fn as_response(&self) -> Option<&Response> {
        match self {
            Self::Response { response, .. } => Some(response),
            Self::Text { .. } => None,
        }
    }
}

/// A reaction change captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedReaction {
    /// Channel holding the message.
    pub channel: ChannelId,
    /// Message reacted to.
    pub message: MessageId,
    /// Emoji used.
    pub emoji: String,
    /// `true` for an add, `false` for a removal.
    pub added: bool,
}

#[derive(Debug, Default)]
struct RecordingState {
    outbound: Vec<Outbound>,
    reactions: Vec<RecordedReaction>,
    presences: Vec<String>,
    next_message_id: u64,
}

/// Thread-safe transport that records everything it is asked to send.
///
/// Clones share the same recording, so a test can keep one handle while the
/// bot owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    state: Arc<RwLock<RecordingState>>,
    forbid_reactions: bool,
    reject_sends: bool,
}

impl RecordingTransport {
    /// Creates an empty recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every reaction call fail with [`TransportError::Forbidden`].
    #[must_use]
    pub const fn forbidding_reactions(mut self) -> Self {
        self.forbid_reactions = true;
        self
    }

    /// Makes every send fail with [`TransportError::Rejected`].
    #[must_use]
    pub const fn rejecting_sends(mut self) -> Self {
        self.reject_sends = true;
        self
    }

    /// Returns every payload sent so far, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<Outbound> {
        self.read(|state| state.outbound.clone())
    }

    /// Returns every structured response sent so far, in order.
    #[must_use]
    pub fn responses(&self) -> Vec<Response> {
        self.read(|state| {
            state
                .outbound
                .iter()
                .filter_map(Outbound::as_response)
                .cloned()
                .collect()
        })
    }

    /// Returns the structured responses sent to `channel`.
    #[must_use]
    pub fn responses_in(&self, channel: ChannelId) -> Vec<Response> {
        self.read(|state| {
            state
                .outbound
                .iter()
                .filter(|outbound| outbound.channel() == channel)
                .filter_map(Outbound::as_response)
                .cloned()
                .collect()
        })
    }

    /// Returns the plain-text messages sent so far.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.read(|state| {
            state
                .outbound
                .iter()
                .filter_map(|outbound| match outbound {
                    Outbound::Text { text, .. } => Some(text.clone()),
                    Outbound::Response { .. } => None,
                })
                .collect()
        })
    }

    /// Returns the reaction changes applied so far.
    #[must_use]
    pub fn reactions(&self) -> Vec<RecordedReaction> {
        self.read(|state| state.reactions.clone())
    }

    /// Returns the presence lines set so far.
    #[must_use]
    pub fn presences(&self) -> Vec<String> {
        self.read(|state| state.presences.clone())
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        if let Ok(mut state) = self.state.write() {
            state.outbound.clear();
            state.reactions.clear();
            state.presences.clear();
        }
    }

    fn read<T: Default>(&self, f: impl FnOnce(&RecordingState) -> T) -> T {
        self.state.read().map(|state| f(&state)).unwrap_or_default()
    }

    fn record_send(&self, outbound: Outbound) -> TransportResult<MessageId> {
        if self.reject_sends {
            return Err(TransportError::Rejected(format!(
                "sends to channel {} are disabled",
                outbound.channel()
            )));
        }
        let mut state = self
            .state
            .write()
            .map_err(|err| TransportError::unavailable(std::io::Error::other(err.to_string())))?;
        state.next_message_id += 1;
        state.outbound.push(outbound);
        Ok(MessageId::new(state.next_message_id))
    }

    fn record_reaction(&self, reaction: RecordedReaction) -> TransportResult<()> {
        if self.forbid_reactions {
            return Err(TransportError::Forbidden(format!(
                "cannot react in channel {}",
                reaction.channel
            )));
        }
        let mut state = self
            .state
            .write()
            .map_err(|err| TransportError::unavailable(std::io::Error::other(err.to_string())))?;
        state.reactions.push(reaction);
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_response(
        &self,
        channel: ChannelId,
        response: &Response,
    ) -> TransportResult<MessageId> {
        self.record_send(Outbound::Response {
            channel,
            response: response.clone(),
        })
    }

    async fn send_text(&self, channel: ChannelId, text: &str) -> TransportResult<MessageId> {
        self.record_send(Outbound::Text {
            channel,
            text: text.to_owned(),
        })
    }

    async fn add_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
    ) -> TransportResult<()> {
        self.record_reaction(RecordedReaction {
            channel,
            message,
            emoji: emoji.to_owned(),
            added: true,
        })
    }

    async fn remove_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
    ) -> TransportResult<()> {
        self.record_reaction(RecordedReaction {
            channel,
            message,
            emoji: emoji.to_owned(),
            added: false,
        })
    }

    async fn set_presence(&self, activity: &str) -> TransportResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TransportError::unavailable(std::io::Error::other(err.to_string())))?;
        state.presences.push(activity.to_owned());
        Ok(())
    }
}

/// Permission source backed by a fixed grant table.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    grants: HashMap<(GuildId, UserId), HashSet<Capability>>,
    allow_all: bool,
}

impl StaticPermissions {
    /// Creates a source that grants nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source that grants every capability to everyone.
    #[must_use]
    pub fn allow_all() -> Self {
        Self {
            allow_all: true,
            ..Self::default()
        }
    }

    /// Grants `capability` to `user` in `guild`.
    #[must_use]
    pub fn with_grant(mut self, guild: GuildId, user: UserId, capability: Capability) -> Self {
        self.grants
            .entry((guild, user))
            .or_default()
            .insert(capability);
        self
    }
}

#[async_trait]
impl PermissionSource for StaticPermissions {
    async fn has_capability(
        &self,
        user: UserId,
        guild: GuildId,
        _channel: ChannelId,
        capability: Capability,
    ) -> PermissionResult<bool> {
        if self.allow_all {
            return Ok(true);
        }
        Ok(self.grants.get(&(guild, user)).is_some_and(|held| {
            held.contains(&Capability::Administrator) || held.contains(&capability)
        }))
    }
}
