//! Shared helpers for the `PostgreSQL` adapter tests.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use kern::gateway::domain::GuildId;
use rand::Rng;

/// Environment variable naming the test database.
pub const DATABASE_URL_VAR: &str = "KERN_TEST_DATABASE_URL";

/// Connection pool shared by both adapters.
pub type TestPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a pool for the test database, or `None` when no database is
/// configured.
pub async fn pool() -> eyre::Result<Option<TestPool>> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        return Ok(None);
    };
    let built = tokio::task::spawn_blocking(move || {
        Pool::builder()
            .max_size(2)
            .build(ConnectionManager::<PgConnection>::new(url))
    })
    .await??;
    Ok(Some(built))
}

/// A guild id no other test run is likely to use.
pub fn fresh_guild() -> GuildId {
    GuildId::new(rand::rng().random_range(1_000_000_000..u64::from(u32::MAX)))
}
