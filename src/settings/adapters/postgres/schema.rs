//! Diesel schema for guild settings persistence.

diesel::table! {
    /// One row per guild that changed any setting.
    servers (server_id) {
        /// Guild snowflake.
        server_id -> Int8,
        /// Channel contest submissions are received in.
        receive_channel_id -> Nullable<Int8>,
        /// Channel contest submissions are voted on in.
        vote_channel_id -> Nullable<Int8>,
        /// Custom command prefix; `NULL` means the global default.
        #[max_length = 32]
        prefix -> Nullable<Varchar>,
        /// Highest rating a contest submission may receive.
        max_rating -> Nullable<Int4>,
    }
}

/// DDL creating the `servers` table when it does not exist yet.
pub const CREATE_SERVERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS servers (
    server_id BIGINT PRIMARY KEY,
    receive_channel_id BIGINT,
    vote_channel_id BIGINT,
    prefix VARCHAR(32),
    max_rating INTEGER
)";
