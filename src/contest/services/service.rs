//! Contest submission service.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info};

use crate::contest::{
    domain::{DEFAULT_MAX_RATING, MAX_SUBMISSION_ID, Submission, SubmissionId},
    ports::{SubmissionRepository, SubmissionRepositoryError},
};
use crate::gateway::domain::{GuildId, UserId};
use crate::response::domain::Response;
use crate::settings::ports::{GuildSettingsError, GuildSettingsRepository};

/// Number of random draws before id generation gives up.
const MAX_ID_ATTEMPTS: usize = 64;

/// Result type for contest service operations.
pub type ContestServiceResult<T> = Result<T, ContestServiceError>;

/// Errors returned by [`ContestService`].
#[derive(Debug, Clone, Error)]
pub enum ContestServiceError {
    /// No submission with this id exists in the guild.
    #[error("no submission with id {0}")]
    NotFound(SubmissionId),

    /// The rating exceeds the guild's maximum.
    #[error("the rating {rating} is greater than the maximum rating allowed ({max})")]
    RatingTooHigh {
        /// Requested rating.
        rating: u32,
        /// Guild maximum.
        max: u32,
    },

    /// A maximum rating of zero was requested.
    #[error("the maximum rating must be at least 1")]
    InvalidMaxRating,

    /// No free submission id could be drawn.
    #[error("no free submission id after {MAX_ID_ATTEMPTS} attempts")]
    IdSpaceExhausted,

    /// Submission persistence failed.
    #[error(transparent)]
    Submissions(#[from] SubmissionRepositoryError),

    /// Settings persistence failed.
    #[error(transparent)]
    Settings(#[from] GuildSettingsError),
}

/// Manages contest entries and their ratings.
pub struct ContestService {
    submissions: Arc<dyn SubmissionRepository>,
    settings: Arc<dyn GuildSettingsRepository>,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for ContestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContestService").finish_non_exhaustive()
    }
}

impl ContestService {
    /// Creates a service drawing ids from an OS-seeded generator.
    #[must_use]
    pub fn new(
        submissions: Arc<dyn SubmissionRepository>,
        settings: Arc<dyn GuildSettingsRepository>,
    ) -> Self {
        Self {
            submissions,
            settings,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Replaces the id generator with one seeded from `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    fn draw(&self, taken: &HashSet<SubmissionId>) -> Option<SubmissionId> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..MAX_ID_ATTEMPTS)
            .filter_map(|_| SubmissionId::new(rng.random_range(0..=MAX_SUBMISSION_ID)).ok())
            .find(|candidate| !taken.contains(candidate))
    }

    /// Stores a new entry under a fresh random id.
    ///
    /// # Errors
    ///
    /// Returns [`ContestServiceError::IdSpaceExhausted`] when no free id is
    /// drawn, or a persistence error.
    pub async fn submit(
        &self,
        guild: GuildId,
        owner: UserId,
        embed: Response,
    ) -> ContestServiceResult<Submission> {
        let mut taken: HashSet<SubmissionId> =
            self.submissions.submission_ids().await?.into_iter().collect();
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.draw(&taken).ok_or(ContestServiceError::IdSpaceExhausted)?;
            let submission = Submission::new(id, guild, owner, embed.clone());
            match self.submissions.add_submission(&submission).await {
                Ok(()) => {
                    info!(guild = %guild, owner = %owner, id = %id, "contest submission stored");
                    return Ok(submission);
                }
                Err(SubmissionRepositoryError::DuplicateId(collided)) => {
                    debug!(id = %collided, "submission id taken concurrently, drawing again");
                    taken.insert(collided);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(ContestServiceError::IdSpaceExhausted)
    }

    /// Returns the submission with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ContestServiceError::NotFound`] when it does not exist.
    pub async fn submission(&self, id: SubmissionId) -> ContestServiceResult<Submission> {
        self.submissions
            .get_submission(id)
            .await?
            .ok_or(ContestServiceError::NotFound(id))
    }

    /// Returns the guild's entries ordered by rating, unrated last.
    ///
    /// # Errors
    ///
    /// Returns a persistence error.
    pub async fn list(&self, guild: GuildId) -> ContestServiceResult<Vec<Submission>> {
        Ok(self.submissions.list_submissions(guild).await?)
    }

    /// Removes every entry `owner` made in `guild`.
    ///
    /// # Errors
    ///
    /// Returns a persistence error.
    pub async fn withdraw(&self, guild: GuildId, owner: UserId) -> ContestServiceResult<usize> {
        Ok(self.submissions.remove_submission(guild, owner).await?)
    }

    /// Removes one entry from `guild`.
    ///
    /// # Errors
    ///
    /// Returns [`ContestServiceError::NotFound`] when the guild has no such
    /// entry.
    pub async fn clear(&self, guild: GuildId, id: SubmissionId) -> ContestServiceResult<()> {
        if self.submissions.clear_submission(guild, id).await? {
            Ok(())
        } else {
            Err(ContestServiceError::NotFound(id))
        }
    }

    /// Removes every entry in `guild`.
    ///
    /// # Errors
    ///
    /// Returns a persistence error.
    pub async fn purge(&self, guild: GuildId) -> ContestServiceResult<usize> {
        let removed = self.submissions.purge_submissions(guild).await?;
        info!(guild = %guild, removed, "contest submissions purged");
        Ok(removed)
    }

    /// Rates an entry, bounded by the guild's maximum rating.
    ///
    /// # Errors
    ///
    /// Returns [`ContestServiceError::RatingTooHigh`] above the maximum and
    /// [`ContestServiceError::NotFound`] for unknown entries.
    pub async fn rate(
        &self,
        guild: GuildId,
        id: SubmissionId,
        rating: u32,
    ) -> ContestServiceResult<()> {
        let max = self.max_rating(guild).await?;
        if rating > max {
            return Err(ContestServiceError::RatingTooHigh { rating, max });
        }
        if self.submissions.set_rating(guild, id, rating).await? {
            Ok(())
        } else {
            Err(ContestServiceError::NotFound(id))
        }
    }

    /// Returns an entry's rating.
    ///
    /// # Errors
    ///
    /// Returns a persistence error.
    pub async fn rating(
        &self,
        guild: GuildId,
        id: SubmissionId,
    ) -> ContestServiceResult<Option<u32>> {
        Ok(self.submissions.get_rating(guild, id).await?)
    }

    /// Returns the guild's maximum rating, [`DEFAULT_MAX_RATING`] when unset.
    ///
    /// # Errors
    ///
    /// Returns a settings persistence error.
    pub async fn max_rating(&self, guild: GuildId) -> ContestServiceResult<u32> {
        Ok(self
            .settings
            .get_max_rating(guild)
            .await?
            .unwrap_or(DEFAULT_MAX_RATING))
    }

    /// Stores the guild's maximum rating.
    ///
    /// # Errors
    ///
    /// Returns [`ContestServiceError::InvalidMaxRating`] for zero.
    pub async fn set_max_rating(&self, guild: GuildId, max: u32) -> ContestServiceResult<()> {
        if max == 0 {
            return Err(ContestServiceError::InvalidMaxRating);
        }
        self.settings.set_max_rating(guild, max).await?;
        Ok(())
    }
}
