//! Guild capabilities checked by permission guards.

use std::fmt;

/// A permission a member may hold inside a guild.
///
/// Capabilities only exist in guild context; a direct message never grants
/// any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Full administrative rights.
    Administrator,
    /// May change guild-wide settings.
    ManageGuild,
    /// May create, edit and delete channels.
    ManageChannels,
    /// May delete and pin other members' messages.
    ManageMessages,
}

impl Capability {
    /// Returns the human-readable capability name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::ManageGuild => "Manage Server",
            Self::ManageChannels => "Manage Channels",
            Self::ManageMessages => "Manage Messages",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
