//! In-memory submission repository.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::contest::{
    domain::{Submission, SubmissionId},
    ports::{SubmissionRepository, SubmissionRepositoryError, SubmissionResult},
};
use crate::gateway::domain::{GuildId, UserId};

/// Thread-safe in-memory submission repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissions {
    rows: Arc<RwLock<BTreeMap<SubmissionId, Submission>>>,
}

impl InMemorySubmissions {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> SubmissionResult<RwLockReadGuard<'_, BTreeMap<SubmissionId, Submission>>> {
        self.rows.read().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> SubmissionResult<RwLockWriteGuard<'_, BTreeMap<SubmissionId, Submission>>> {
        self.rows.write().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Orders by rating ascending with unrated entries last, then by id.
fn by_rating(left: &Submission, right: &Submission) -> Ordering {
    match (left.rating(), right.rating()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| left.id().cmp(&right.id()))
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissions {
    async fn add_submission(&self, submission: &Submission) -> SubmissionResult<()> {
        let mut rows = self.write()?;
        if rows.contains_key(&submission.id()) {
            return Err(SubmissionRepositoryError::DuplicateId(submission.id()));
        }
        rows.insert(submission.id(), submission.clone());
        Ok(())
    }

    async fn get_submission(&self, id: SubmissionId) -> SubmissionResult<Option<Submission>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn list_submissions(&self, guild: GuildId) -> SubmissionResult<Vec<Submission>> {
        let mut listed: Vec<Submission> = self
            .read()?
            .values()
            .filter(|submission| submission.guild() == guild)
            .cloned()
            .collect();
        listed.sort_by(by_rating);
        Ok(listed)
    }

    async fn remove_submission(&self, guild: GuildId, owner: UserId) -> SubmissionResult<usize> {
        let mut rows = self.write()?;
        let before = rows.len();
        rows.retain(|_, submission| submission.guild() != guild || submission.owner() != owner);
        Ok(before.saturating_sub(rows.len()))
    }

    async fn clear_submission(&self, guild: GuildId, id: SubmissionId) -> SubmissionResult<bool> {
        let mut rows = self.write()?;
        if rows.get(&id).is_some_and(|submission| submission.guild() == guild) {
            rows.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn purge_submissions(&self, guild: GuildId) -> SubmissionResult<usize> {
        let mut rows = self.write()?;
        let before = rows.len();
        rows.retain(|_, submission| submission.guild() != guild);
        Ok(before.saturating_sub(rows.len()))
    }

    async fn set_rating(
        &self,
        guild: GuildId,
        id: SubmissionId,
        rating: u32,
    ) -> SubmissionResult<bool> {
        let mut rows = self.write()?;
        let Some(stored) = rows.get_mut(&id).filter(|submission| submission.guild() == guild)
        else {
            return Ok(false);
        };
        *stored = stored.clone().with_rating(Some(rating));
        Ok(true)
    }

    async fn get_rating(&self, guild: GuildId, id: SubmissionId) -> SubmissionResult<Option<u32>> {
        Ok(self
            .read()?
            .get(&id)
            .filter(|submission| submission.guild() == guild)
            .and_then(Submission::rating))
    }

    async fn submission_ids(&self) -> SubmissionResult<Vec<SubmissionId>> {
        Ok(self.read()?.keys().copied().collect())
    }
}
