//! SQLite-backed sign-in sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::connection::Database;
use super::sql::db_error;
use crate::infrastructure::ports::{RepoError, Session, SessionRepo};

pub struct SqliteSessionRepo {
    db: Database,
}

impl SqliteSessionRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepo for SqliteSessionRepo {
    async fn create(&self, session: &Session) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(self.db.pool())
        .await
        .map_err(|e| db_error("create session", e))?;
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, RepoError> {
        let row = sqlx::query(
            "SELECT token, user_id, created_at, expires_at FROM sessions WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| db_error("get session", e))?;

        match row {
            Some(row) => Ok(Some(Session {
                token: row.get("token"),
                user_id: row.get("user_id"),
                created_at: row.get("created_at"),
                expires_at: row.get("expires_at"),
            })),
            None => Ok(None),
        }
    }

    async fn delete(&self, token: &str) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.db.pool())
            .await
            .map_err(|e| db_error("delete session", e))?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(self.db.pool())
            .await
            .map_err(|e| db_error("purge sessions", e))?;
        Ok(result.rows_affected())
    }
}
