//! SQLite connection management

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

use super::schema;
use crate::infrastructure::ports::RepoError;

/// Shared SQLite connection pool.
///
/// Counts successful commits so callers can observe how many units of work
/// an operation produced.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    commits: Arc<AtomicU64>,
}

impl Database {
    /// Connects to the database named by `url`, creating the file if needed.
    pub async fn connect(url: &str) -> Result<Self, RepoError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepoError::database("connect", e))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        tracing::info!(url, "Connected to SQLite");
        Ok(Self::from_pool(pool))
    }

    /// A private in-memory database.
    ///
    /// Each connection to `sqlite::memory:` gets its own database, so the pool
    /// holds exactly one connection and never recycles it.
    pub async fn in_memory() -> Result<Self, RepoError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepoError::database("connect", e))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        Ok(Self::from_pool(pool))
    }

    fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            commits: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create every table and index the application uses.
    pub async fn initialize_schema(&self) -> Result<(), RepoError> {
        schema::ensure_schema(&self.pool).await
    }

    /// Number of transactions committed through this handle and its clones.
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }

    pub(crate) async fn begin(&self) -> Result<Transaction<'static, Sqlite>, RepoError> {
        self.pool
            .begin()
            .await
            .map_err(|e| RepoError::database("begin", e))
    }

    pub(crate) async fn commit(&self, tx: Transaction<'static, Sqlite>) -> Result<(), RepoError> {
        tx.commit()
            .await
            .map_err(|e| RepoError::database("commit", e))?;
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_commits_are_counted() {
        let db = Database::in_memory().await.unwrap();
        assert_eq!(db.commit_count(), 0);

        let tx = db.begin().await.unwrap();
        db.commit(tx).await.unwrap();

        let clone = db.clone();
        let tx = clone.begin().await.unwrap();
        clone.commit(tx).await.unwrap();

        assert_eq!(db.commit_count(), 2);
    }

    #[tokio::test]
    async fn file_database_is_created_on_connect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitness.db");
        let url = format!("sqlite://{}", path.display());

        let db = Database::connect(&url).await.unwrap();
        db.initialize_schema().await.unwrap();

        assert!(path.exists());
    }
}
