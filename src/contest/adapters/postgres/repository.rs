//! `PostgreSQL` repository implementation for contest submissions.

use super::{
    models::{NewSubmissionRow, SubmissionRow},
    schema::{CREATE_SUBMISSIONS_TABLE, submissions},
};
use crate::contest::{
    domain::{Submission, SubmissionId},
    ports::{SubmissionRepository, SubmissionRepositoryError, SubmissionResult},
};
use crate::gateway::domain::{GuildId, UserId};
use crate::response::domain::Response;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the contest adapter.
pub type ContestPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed submission repository.
#[derive(Debug, Clone)]
pub struct PostgresSubmissions {
    pool: ContestPgPool,
}

impl PostgresSubmissions {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ContestPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `submissions` table if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionRepositoryError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> SubmissionResult<()> {
        self.run_blocking(|connection| {
            diesel::sql_query(CREATE_SUBMISSIONS_TABLE)
                .execute(connection)
                .map_err(SubmissionRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> SubmissionResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SubmissionResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SubmissionRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SubmissionRepositoryError::persistence)?
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissions {
    async fn add_submission(&self, submission: &Submission) -> SubmissionResult<()> {
        let id = submission.id();
        let row = NewSubmissionRow {
            submission_id: to_db_submission(id)?,
            embed: serde_json::to_value(submission.embed())
                .map_err(SubmissionRepositoryError::persistence)?,
            server_id: to_db_id(submission.guild().get())?,
            owner_id: to_db_id(submission.owner().get())?,
            rating: submission.rating().map(to_db_rating).transpose()?,
        };
        self.run_blocking(move |connection| {
            match diesel::insert_into(submissions::table)
                .values(&row)
                .execute(connection)
            {
                Ok(_) => Ok(()),
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                    Err(SubmissionRepositoryError::DuplicateId(id))
                }
                Err(err) => Err(SubmissionRepositoryError::persistence(err)),
            }
        })
        .await
    }

    async fn get_submission(&self, id: SubmissionId) -> SubmissionResult<Option<Submission>> {
        let submission_id = to_db_submission(id)?;
        self.run_blocking(move |connection| {
            submissions::table
                .filter(submissions::submission_id.eq(submission_id))
                .select(SubmissionRow::as_select())
                .first::<SubmissionRow>(connection)
                .optional()
                .map_err(SubmissionRepositoryError::persistence)?
                .map(row_to_submission)
                .transpose()
        })
        .await
    }

    async fn list_submissions(&self, guild: GuildId) -> SubmissionResult<Vec<Submission>> {
        let server_id = to_db_id(guild.get())?;
        self.run_blocking(move |connection| {
            submissions::table
                .filter(submissions::server_id.eq(server_id))
                .order((
                    submissions::rating.asc().nulls_last(),
                    submissions::submission_id.asc(),
                ))
                .select(SubmissionRow::as_select())
                .load::<SubmissionRow>(connection)
                .map_err(SubmissionRepositoryError::persistence)?
                .into_iter()
                .map(row_to_submission)
                .collect()
        })
        .await
    }

    async fn remove_submission(&self, guild: GuildId, owner: UserId) -> SubmissionResult<usize> {
        let server_id = to_db_id(guild.get())?;
        let owner_id = to_db_id(owner.get())?;
        self.run_blocking(move |connection| {
            diesel::delete(
                submissions::table
                    .filter(submissions::server_id.eq(server_id))
                    .filter(submissions::owner_id.eq(owner_id)),
            )
            .execute(connection)
            .map_err(SubmissionRepositoryError::persistence)
        })
        .await
    }

    async fn clear_submission(&self, guild: GuildId, id: SubmissionId) -> SubmissionResult<bool> {
        let server_id = to_db_id(guild.get())?;
        let submission_id = to_db_submission(id)?;
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                submissions::table
                    .filter(submissions::submission_id.eq(submission_id))
                    .filter(submissions::server_id.eq(server_id)),
            )
            .execute(connection)
            .map_err(SubmissionRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn purge_submissions(&self, guild: GuildId) -> SubmissionResult<usize> {
        let server_id = to_db_id(guild.get())?;
        self.run_blocking(move |connection| {
            diesel::delete(submissions::table.filter(submissions::server_id.eq(server_id)))
                .execute(connection)
                .map_err(SubmissionRepositoryError::persistence)
        })
        .await
    }

    async fn set_rating(
        &self,
        guild: GuildId,
        id: SubmissionId,
        rating: u32,
    ) -> SubmissionResult<bool> {
        let server_id = to_db_id(guild.get())?;
        let submission_id = to_db_submission(id)?;
        let value = Some(to_db_rating(rating)?);
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                submissions::table
                    .filter(submissions::submission_id.eq(submission_id))
                    .filter(submissions::server_id.eq(server_id)),
            )
            .set(submissions::rating.eq(value))
            .execute(connection)
            .map_err(SubmissionRepositoryError::persistence)?;
            Ok(updated > 0)
        })
        .await
    }

    async fn get_rating(&self, guild: GuildId, id: SubmissionId) -> SubmissionResult<Option<u32>> {
        let server_id = to_db_id(guild.get())?;
        let submission_id = to_db_submission(id)?;
        self.run_blocking(move |connection| {
            let stored = submissions::table
                .filter(submissions::submission_id.eq(submission_id))
                .filter(submissions::server_id.eq(server_id))
                .select(submissions::rating)
                .first::<Option<i32>>(connection)
                .optional()
                .map_err(SubmissionRepositoryError::persistence)?;
            stored.flatten().map(from_db_rating).transpose()
        })
        .await
    }

    async fn submission_ids(&self) -> SubmissionResult<Vec<SubmissionId>> {
        self.run_blocking(|connection| {
            submissions::table
                .select(submissions::submission_id)
                .load::<i32>(connection)
                .map_err(SubmissionRepositoryError::persistence)?
                .into_iter()
                .map(from_db_submission)
                .collect()
        })
        .await
    }
}

fn row_to_submission(row: SubmissionRow) -> SubmissionResult<Submission> {
    let embed: Response = serde_json::from_value(row.embed)
        .map_err(SubmissionRepositoryError::invalid_persisted_data)?;
    let submission = Submission::new(
        from_db_submission(row.submission_id)?,
        GuildId::new(from_db_id(row.server_id)?),
        UserId::new(from_db_id(row.owner_id)?),
        embed,
    );
    Ok(submission.with_rating(row.rating.map(from_db_rating).transpose()?))
}

fn to_db_id(value: u64) -> SubmissionResult<i64> {
    i64::try_from(value).map_err(SubmissionRepositoryError::persistence)
}

fn from_db_id(value: i64) -> SubmissionResult<u64> {
    u64::try_from(value).map_err(SubmissionRepositoryError::invalid_persisted_data)
}

fn to_db_submission(id: SubmissionId) -> SubmissionResult<i32> {
    i32::try_from(id.get()).map_err(SubmissionRepositoryError::persistence)
}

fn from_db_submission(value: i32) -> SubmissionResult<SubmissionId> {
    let raw = u32::try_from(value).map_err(SubmissionRepositoryError::invalid_persisted_data)?;
    SubmissionId::new(raw).map_err(SubmissionRepositoryError::invalid_persisted_data)
}

fn to_db_rating(rating: u32) -> SubmissionResult<i32> {
    i32::try_from(rating).map_err(SubmissionRepositoryError::persistence)
}

fn from_db_rating(value: i32) -> SubmissionResult<u32> {
    u32::try_from(value).map_err(SubmissionRepositoryError::invalid_persisted_data)
}
