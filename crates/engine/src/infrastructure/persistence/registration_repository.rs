//! Capacity-checked registration inserts.

use async_trait::async_trait;
use fitnessapp_domain::{Entity, RegistrationRecord, Value};

use super::connection::Database;
use super::sql::{bind_all, db_error};
use super::table::Table;
use crate::infrastructure::ports::{RegistrationRepo, RepoError};

const INSERT_WITHIN_CAPACITY: &str = "\
    INSERT INTO registration_records (fitness_class_id, user_id, registered_at) \
    SELECT ?, ?, ? \
    WHERE (SELECT COUNT(*) FROM registration_records WHERE fitness_class_id = ?) \
        < (SELECT capacity FROM fitness_classes WHERE id = ?)";

pub struct SqliteRegistrationRepo {
    db: Database,
}

impl SqliteRegistrationRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationRepo for SqliteRegistrationRepo {
    async fn register_within_capacity(
        &self,
        record: &mut RegistrationRecord,
    ) -> Result<bool, RepoError> {
        let mut values = record.values();
        values.push(Value::Int(record.fitness_class_id));
        values.push(Value::Int(record.fitness_class_id));

        let mut tx = self.db.begin().await?;
        let result = bind_all(sqlx::query(INSERT_WITHIN_CAPACITY), values)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("register", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(
                class_id = record.fitness_class_id,
                user_id = record.user_id,
                "Class full, registration refused"
            );
            return Ok(false);
        }

        self.db.commit(tx).await?;
        record.id = result.last_insert_rowid();
        tracing::debug!(entity = RegistrationRecord::NAME, id = record.id, "Inserted");
        Ok(true)
    }
}
