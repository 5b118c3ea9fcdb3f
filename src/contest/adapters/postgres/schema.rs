//! Diesel schema for contest submissions.

diesel::table! {
    /// One row per contest entry.
    submissions (submission_id) {
        /// Six-digit submission id, unique across guilds.
        submission_id -> Int4,
        /// Submitted response, stored as JSON.
        embed -> Jsonb,
        /// Guild snowflake.
        server_id -> Int8,
        /// Submitting member's snowflake.
        owner_id -> Int8,
        /// Rating given by the judges.
        rating -> Nullable<Int4>,
    }
}

/// DDL creating the `submissions` table when it does not exist yet.
pub const CREATE_SUBMISSIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS submissions (
    submission_id INTEGER PRIMARY KEY,
    embed JSONB NOT NULL,
    server_id BIGINT NOT NULL,
    owner_id BIGINT NOT NULL,
    rating INTEGER
)";
