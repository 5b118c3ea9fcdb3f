//! Diesel row models for guild settings persistence.

use super::schema::servers;
use diesel::prelude::*;

/// Query result row for the channel columns of a guild.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = servers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChannelColumns {
    /// Channel contest submissions are received in.
    pub receive_channel_id: Option<i64>,
    /// Channel contest submissions are voted on in.
    pub vote_channel_id: Option<i64>,
}
