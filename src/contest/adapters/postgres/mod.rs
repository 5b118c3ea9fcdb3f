//! `PostgreSQL` adapter for contest submissions.

mod models;
mod repository;
mod schema;

pub use repository::{ContestPgPool, PostgresSubmissions};
