//! Repository port for contest submissions.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::contest::domain::{Submission, SubmissionId};
use crate::gateway::domain::{GuildId, UserId};

/// Result type for submission repository operations.
pub type SubmissionResult<T> = Result<T, SubmissionRepositoryError>;

/// Contest submission persistence contract.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Stores a new submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionRepositoryError::DuplicateId`] when the id is
    /// already taken.
    async fn add_submission(&self, submission: &Submission) -> SubmissionResult<()>;

    /// Returns the submission with `id`, in any guild.
    async fn get_submission(&self, id: SubmissionId) -> SubmissionResult<Option<Submission>>;

    /// Returns the guild's submissions ordered by rating, unrated last.
    async fn list_submissions(&self, guild: GuildId) -> SubmissionResult<Vec<Submission>>;

    /// Removes every submission `owner` made in `guild`, returning how many.
    async fn remove_submission(&self, guild: GuildId, owner: UserId) -> SubmissionResult<usize>;

    /// Removes one submission from `guild`, returning whether it existed.
    async fn clear_submission(&self, guild: GuildId, id: SubmissionId) -> SubmissionResult<bool>;

    /// Removes every submission in `guild`, returning how many.
    async fn purge_submissions(&self, guild: GuildId) -> SubmissionResult<usize>;

    /// Rates a submission in `guild`, returning whether it existed.
    async fn set_rating(
        &self,
        guild: GuildId,
        id: SubmissionId,
        rating: u32,
    ) -> SubmissionResult<bool>;

    /// Returns the rating of a submission in `guild`.
    async fn get_rating(&self, guild: GuildId, id: SubmissionId) -> SubmissionResult<Option<u32>>;

    /// Returns every id currently taken.
    async fn submission_ids(&self) -> SubmissionResult<Vec<SubmissionId>>;
}

/// Errors returned by submission repositories.
#[derive(Debug, Clone, Error)]
pub enum SubmissionRepositoryError {
    /// The id is already taken.
    #[error("submission id {0} already exists")]
    DuplicateId(SubmissionId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SubmissionRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
