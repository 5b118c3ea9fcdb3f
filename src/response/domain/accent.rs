//! Response accents and their rendering defaults.

use serde::{Deserialize, Serialize};

/// Visual flavour of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    /// Something went wrong.
    Error,
    /// An operation completed.
    Success,
    /// Informational output.
    Neutral,
    /// Needs attention but did not fail.
    Warning,
}

impl Accent {
    /// Returns the RGB colour used for this accent.
    #[must_use]
    pub const fn colour(self) -> u32 {
        match self {
            Self::Error => 0x00E7_4C3C,
            Self::Success => 0x002E_CC71,
            Self::Neutral => 0x0036_393E,
            Self::Warning => 0x00E6_7E22,
        }
    }

    /// Returns the title used when the caller does not choose one.
    #[must_use]
    pub const fn default_title(self) -> Option<&'static str> {
        match self {
            Self::Error => Some("Error:"),
            Self::Success => Some("Success:"),
            Self::Neutral | Self::Warning => None,
        }
    }

    /// Returns `true` when responses of this accent carry the requester
    /// footer and a timestamp unless told otherwise.
    #[must_use]
    pub const fn stamps_by_default(self) -> bool {
        !matches!(self, Self::Error)
    }
}
