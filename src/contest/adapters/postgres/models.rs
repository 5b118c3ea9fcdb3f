//! Diesel row models for contest submissions.

use super::schema::submissions;
use diesel::prelude::*;

/// Query result row for the `submissions` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubmissionRow {
    /// Submission id.
    pub submission_id: i32,
    /// Submitted response as JSON.
    pub embed: serde_json::Value,
    /// Guild snowflake.
    pub server_id: i64,
    /// Submitting member's snowflake.
    pub owner_id: i64,
    /// Optional rating.
    pub rating: Option<i32>,
}

/// Insert model for a new submission.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = submissions)]
pub struct NewSubmissionRow {
    /// Submission id.
    pub submission_id: i32,
    /// Submitted response as JSON.
    pub embed: serde_json::Value,
    /// Guild snowflake.
    pub server_id: i64,
    /// Submitting member's snowflake.
    pub owner_id: i64,
    /// Optional rating.
    pub rating: Option<i32>,
}
