//! The generic repository every entity is accessed through.

use std::sync::Arc;

use fitnessapp_domain::{Entity, EntityId, Predicate};

use super::query::{Batch, Query};
use crate::infrastructure::ports::{EntityRepo, RepoError};

/// Data access for one entity type.
///
/// Reads are lazy: [`Repository::all`] and [`Repository::find`] return a
/// [`Query`] that touches storage only when executed. Writes persist
/// immediately, each in its own unit of work.
pub struct Repository<E: Entity> {
    store: Arc<dyn EntityRepo<E>>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(store: Arc<dyn EntityRepo<E>>) -> Self {
        Self { store }
    }

    /// Every entity, with the named relations attached.
    pub fn all(&self, includes: &[E::Include]) -> Query<E> {
        Query::new(self.store.clone()).include_all(includes)
    }

    /// Entities matching `predicate`, with the named relations attached.
    pub fn find(&self, predicate: Predicate<E::Column>, includes: &[E::Include]) -> Query<E> {
        self.all(includes).filter(predicate)
    }

    /// The entity with this identity, or `None`.
    pub async fn find_by_id(
        &self,
        id: EntityId,
        includes: &[E::Include],
    ) -> Result<Option<E>, RepoError> {
        self.find(Predicate::id(id), includes).first().await
    }

    /// Persists a transient entity and writes the assigned identity back into
    /// it. An entity that already has an identity is updated in place.
    pub async fn insert(&self, entity: &mut E) -> Result<(), RepoError> {
        self.store.save(entity).await
    }

    /// Inserts each entity in order, then commits once more.
    ///
    /// Each element is its own unit of work, so a failure part way through
    /// leaves the earlier elements persisted and stops before the rest.
    pub async fn insert_range(&self, entities: &mut [E]) -> Result<(), RepoError> {
        for entity in entities.iter_mut() {
            self.store.save(entity).await?;
        }
        self.store.commit().await
    }

    /// Deletes the entity with this identity. A missing identity is not an
    /// error; a commit still takes place.
    pub async fn delete(&self, id: EntityId) -> Result<(), RepoError> {
        match self.find_by_id(id, &[]).await? {
            Some(entity) => self.store.remove(&entity).await?,
            None => tracing::debug!(entity = E::NAME, id, "Delete skipped, no such row"),
        }
        self.store.commit().await
    }

    /// Deletes the row carrying `entity`'s identity.
    pub async fn delete_entity(&self, entity: &E) -> Result<(), RepoError> {
        self.store.remove(entity).await
    }

    /// Persists a new entity and returns it with its identity.
    pub async fn create(&self, entity: E) -> Result<E, RepoError> {
        let mut entity = entity;
        if !entity.is_transient() {
            entity.set_id(0);
        }
        self.store.save(&mut entity).await?;
        Ok(entity)
    }

    /// Overwrites an existing entity. Fails with [`RepoError::Stale`] when no
    /// row carries its identity.
    pub async fn update(&self, entity: E) -> Result<E, RepoError> {
        if entity.is_transient() {
            return Err(RepoError::invalid_operation(format!(
                "cannot update a {} that was never saved",
                E::NAME
            )));
        }
        let mut entity = entity;
        self.store.save(&mut entity).await?;
        Ok(entity)
    }

    /// Starts a set of writes that commit together or not at all.
    pub fn batch(&self) -> Batch<E> {
        Batch::new(self.store.clone())
    }
}
