//! Generic SQLite storage for any [`Table`].

use std::marker::PhantomData;

use async_trait::async_trait;
use fitnessapp_domain::{EntityId, QuerySpec, Value};
use sqlx::{Row, SqliteConnection};

use super::connection::Database;
use super::sql::{self, bind_all, db_error};
use super::table::Table;
use crate::infrastructure::ports::{EntityRepo, RepoError, Write};

/// SQLite implementation of [`EntityRepo`] for one table.
pub struct SqliteEntityRepo<E> {
    db: Database,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Table> SqliteEntityRepo<E> {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

async fn insert_row<E: Table>(
    conn: &mut SqliteConnection,
    entity: &E,
) -> Result<EntityId, RepoError> {
    let statement = sql::insert::<E>();
    let result = bind_all(sqlx::query(&statement), entity.values())
        .execute(conn)
        .await
        .map_err(|e| db_error("insert", e))?;
    Ok(result.last_insert_rowid())
}

async fn update_row<E: Table>(conn: &mut SqliteConnection, entity: &E) -> Result<(), RepoError> {
    let statement = sql::update::<E>();
    let mut values = entity.values();
    values.push(Value::Int(entity.id()));

    let result = bind_all(sqlx::query(&statement), values)
        .execute(conn)
        .await
        .map_err(|e| db_error("update", e))?;

    if result.rows_affected() == 0 {
        return Err(RepoError::stale(E::NAME, entity.id()));
    }
    Ok(())
}

async fn delete_row<E: Table>(conn: &mut SqliteConnection, id: EntityId) -> Result<u64, RepoError> {
    let statement = sql::delete::<E>();
    let result = sqlx::query(&statement)
        .bind(id)
        .execute(conn)
        .await
        .map_err(|e| db_error("delete", e))?;
    Ok(result.rows_affected())
}

#[async_trait]
impl<E: Table> EntityRepo<E> for SqliteEntityRepo<E> {
    async fn fetch(&self, spec: &QuerySpec<E>) -> Result<Vec<E>, RepoError> {
        let statement = sql::select(spec);
        let rows = statement
            .query()
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| db_error("fetch", e))?;

        let mut entities = rows
            .iter()
            .map(E::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RepoError::Serialization(e.to_string()))?;

        if !entities.is_empty() {
            for include in &spec.includes {
                E::attach(self.db.pool(), &mut entities, *include)
                    .await
                    .map_err(|e| db_error("include", e))?;
            }
        }

        Ok(entities)
    }

    async fn count(&self, spec: &QuerySpec<E>) -> Result<u64, RepoError> {
        let statement = sql::count(spec);
        let row = statement
            .query()
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| db_error("count", e))?;
        let count: i64 = row.try_get(0).map_err(|e| db_error("count", e))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn save(&self, entity: &mut E) -> Result<(), RepoError> {
        let mut tx = self.db.begin().await?;

        if entity.is_transient() {
            let id = insert_row(&mut tx, &*entity).await?;
            self.db.commit(tx).await?;
            entity.set_id(id);
            tracing::debug!(entity = E::NAME, id, "Inserted");
        } else {
            update_row(&mut tx, &*entity).await?;
            self.db.commit(tx).await?;
            tracing::debug!(entity = E::NAME, id = entity.id(), "Updated");
        }
        Ok(())
    }

    async fn remove(&self, entity: &E) -> Result<(), RepoError> {
        if entity.is_transient() {
            return Err(RepoError::invalid_operation(format!(
                "cannot delete a {} that was never saved",
                E::NAME
            )));
        }

        let mut tx = self.db.begin().await?;
        if delete_row::<E>(&mut tx, entity.id()).await? == 0 {
            return Err(RepoError::stale(E::NAME, entity.id()));
        }
        self.db.commit(tx).await?;

        tracing::debug!(entity = E::NAME, id = entity.id(), "Deleted");
        Ok(())
    }

    async fn commit(&self) -> Result<(), RepoError> {
        let tx = self.db.begin().await?;
        self.db.commit(tx).await
    }

    async fn apply(&self, writes: Vec<Write<E>>) -> Result<Vec<E>, RepoError> {
        let mut tx = self.db.begin().await?;
        let mut written = Vec::with_capacity(writes.len());
        let mut assigned = Vec::new();

        for write in writes {
            match write {
                Write::Create(mut entity) => {
                    let id = insert_row(&mut tx, &entity).await?;
                    entity.set_id(id);
                    assigned.push(id);
                    written.push(entity);
                }
                Write::Update(entity) => {
                    if entity.is_transient() {
                        return Err(RepoError::invalid_operation(format!(
                            "cannot update a {} that was never saved",
                            E::NAME
                        )));
                    }
                    update_row(&mut tx, &entity).await?;
                    written.push(entity);
                }
                Write::Delete(id) => {
                    if delete_row::<E>(&mut tx, id).await? == 0 {
                        tracing::debug!(entity = E::NAME, id, "Nothing to delete");
                    }
                }
            }
        }

        self.db.commit(tx).await?;
        tracing::debug!(entity = E::NAME, created = ?assigned, "Applied batch");
        Ok(written)
    }
}
