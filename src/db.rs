use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

use crate::error::StoreError;

/// Opens a pool against `database_url`, creating the file on first run.
/// WAL keeps readers from blocking the writer, and foreign keys are
/// enforced so bookings cannot reference a missing event.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Applies the migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Shared database handle with lazy, single-flight pool acquisition.
///
/// The pool opens on first use, not at construction. Callers racing through
/// [`Database::pool`] during initialization await one shared attempt rather
/// than each opening a pool of their own, and a failed attempt leaves the
/// cell empty so a later call can retry.
#[derive(Debug)]
pub struct Database {
    url: String,
    pool: OnceCell<SqlitePool>,
}

impl Database {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool: OnceCell::new(),
        }
    }

    /// Wraps an already-open pool, skipping lazy acquisition. Used at startup
    /// once migrations have run, and by tests that bring their own pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            url: String::new(),
            pool: OnceCell::new_with(Some(pool)),
        }
    }

    pub async fn pool(&self) -> Result<&SqlitePool, StoreError> {
        self.pool
            .get_or_try_init(|| async {
                info!("Opening database at {}", self.url);
                Ok(init_pool(&self.url).await?)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_pool_and_migrations() {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM evently_events")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(events, 0);

        let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM evently_bookings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(bookings, 0);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_pool() {
        let db = Database::new("sqlite::memory:");

        let (a, b) = tokio::join!(db.pool(), db.pool());
        let a = a.unwrap();
        let b = b.unwrap();

        assert!(std::ptr::eq(a, b));
    }

    #[tokio::test]
    async fn test_failed_acquisition_can_be_retried() {
        // The parent directory does not exist, so opening must fail.
        let db = Database::new("sqlite:///nonexistent-dir/evently.db");

        assert!(db.pool().await.is_err());
        assert!(db.pool().await.is_err());
    }

    #[tokio::test]
    async fn test_from_pool_reuses_given_pool() {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        let db = Database::from_pool(pool);
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM evently_events")
            .fetch_one(db.pool().await.unwrap())
            .await
            .unwrap();

        assert_eq!(count, 0);
    }
}
