//! Adapter implementations for contest persistence.

pub mod memory;
pub mod postgres;

pub use memory::InMemorySubmissions;
pub use postgres::{ContestPgPool, PostgresSubmissions};
