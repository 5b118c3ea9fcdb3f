//! Guild settings domain types.

use crate::gateway::domain::ChannelId;
use serde::{Deserialize, Serialize};

/// Channels used by the contest workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestChannels {
    receive: ChannelId,
    vote: ChannelId,
}

impl ContestChannels {
    /// Creates a channel pair.
    #[must_use]
    pub const fn new(receive: ChannelId, vote: ChannelId) -> Self {
        Self { receive, vote }
    }

    /// Uses one channel for both receiving and voting.
    #[must_use]
    pub const fn single(channel: ChannelId) -> Self {
        Self::new(channel, channel)
    }

    /// Returns the channel submissions are received in.
    #[must_use]
    pub const fn receive(self) -> ChannelId {
        self.receive
    }

    /// Returns the channel submissions are voted on in.
    #[must_use]
    pub const fn vote(self) -> ChannelId {
        self.vote
    }
}
