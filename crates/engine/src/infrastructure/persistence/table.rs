//! Row mapping between entities and their tables.

use async_trait::async_trait;
use fitnessapp_domain::{Entity, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

/// An entity stored in a single table keyed by an `id` column.
#[async_trait]
pub trait Table: Entity {
    const TABLE: &'static str;

    /// Persisted columns other than `id`, in the order [`Table::values`]
    /// produces them.
    const COLUMNS: &'static [&'static str];

    fn values(&self) -> Vec<Value>;

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;

    /// Loads one relation for every row.
    async fn attach(
        _pool: &SqlitePool,
        _rows: &mut [Self],
        _include: Self::Include,
    ) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
