//! Table definitions.
//!
//! Registrations disappear with their class or user. Every other reference is
//! restricted, so a referenced catalog row cannot be deleted.

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS fitness_class_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS instructors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        bio TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS locations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        address TEXT NOT NULL DEFAULT '',
        room TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        display_name TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL CHECK (role IN ('Admin', 'Member'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS fitness_classes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        fitness_class_type_id INTEGER NOT NULL
            REFERENCES fitness_class_types(id) ON DELETE RESTRICT,
        instructor_id INTEGER NOT NULL
            REFERENCES instructors(id) ON DELETE RESTRICT,
        location_id INTEGER NOT NULL
            REFERENCES locations(id) ON DELETE RESTRICT,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        capacity INTEGER NOT NULL CHECK (capacity > 0),
        cancelled INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS registration_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        fitness_class_id INTEGER NOT NULL
            REFERENCES fitness_classes(id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL
            REFERENCES users(id) ON DELETE CASCADE,
        registered_at TEXT NOT NULL,
        UNIQUE (fitness_class_id, user_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS announcements (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        posted_at TEXT NOT NULL,
        expires_at TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sessions (
        token TEXT PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at TEXT NOT NULL,
        expires_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_fitness_classes_start_time ON fitness_classes(start_time)",
    "CREATE INDEX IF NOT EXISTS idx_registration_records_user ON registration_records(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON sessions(expires_at)",
];

pub(crate) async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("schema", e))?;
    }

    tracing::debug!(statements = STATEMENTS.len(), "Database schema ensured");
    Ok(())
}
