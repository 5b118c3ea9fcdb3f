//! Contest submissions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ContestDomainError;
use crate::gateway::domain::{GuildId, UserId};
use crate::response::domain::Response;

/// Largest submission id; ids are shown zero-padded to six digits.
pub const MAX_SUBMISSION_ID: u32 = 999_999;

/// Maximum rating used when a guild has not configured one.
pub const DEFAULT_MAX_RATING: u32 = 10;

/// Six-digit identifier of a submission, unique across guilds.
///
/// # Examples
///
/// ```
/// use kern::contest::domain::SubmissionId;
///
/// let id: SubmissionId = "004217".parse().expect("valid id");
/// assert_eq!(id.get(), 4217);
/// assert_eq!(id.to_string(), "004217");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SubmissionId(u32);

impl SubmissionId {
    /// Creates a submission id.
    ///
    /// # Errors
    ///
    /// Returns [`ContestDomainError::InvalidSubmissionId`] above
    /// [`MAX_SUBMISSION_ID`].
    pub fn new(value: u32) -> Result<Self, ContestDomainError> {
        if value > MAX_SUBMISSION_ID {
            return Err(ContestDomainError::InvalidSubmissionId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

impl FromStr for SubmissionId {
    type Err = ContestDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ContestDomainError::InvalidSubmissionId(s.to_owned()));
        }
        let value = trimmed
            .parse::<u32>()
            .map_err(|_| ContestDomainError::InvalidSubmissionId(s.to_owned()))?;
        Self::new(value)
    }
}

impl TryFrom<u32> for SubmissionId {
    type Error = ContestDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubmissionId> for u32 {
    fn from(value: SubmissionId) -> Self {
        value.0
    }
}

/// One contest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    id: SubmissionId,
    guild: GuildId,
    owner: UserId,
    embed: Response,
    rating: Option<u32>,
}

impl Submission {
    /// Creates an unrated submission.
    #[must_use]
    pub const fn new(id: SubmissionId, guild: GuildId, owner: UserId, embed: Response) -> Self {
        Self {
            id,
            guild,
            owner,
            embed,
            rating: None,
        }
    }

    /// Sets the rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: Option<u32>) -> Self {
        self.rating = rating;
        self
    }

    /// Returns the id.
    #[must_use]
    pub const fn id(&self) -> SubmissionId {
        self.id
    }

    /// Returns the guild the entry belongs to.
    #[must_use]
    pub const fn guild(&self) -> GuildId {
        self.guild
    }

    /// Returns the submitting member.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the submitted content.
    #[must_use]
    pub const fn embed(&self) -> &Response {
        &self.embed
    }

    /// Returns the rating, if one was given.
    #[must_use]
    pub const fn rating(&self) -> Option<u32> {
        self.rating
    }
}
