//! Deferred reads and atomic write batches.

use std::sync::Arc;

use fitnessapp_domain::{Direction, Entity, EntityId, Predicate, QuerySpec};

use crate::infrastructure::ports::{EntityRepo, RepoError, Write};

/// A read that has not run yet.
///
/// Compose it with filters, relations, ordering and a window, then execute
/// with [`Query::fetch_all`], [`Query::first`], [`Query::count`] or
/// [`Query::exists`].
#[must_use = "queries do nothing until executed"]
pub struct Query<E: Entity> {
    store: Arc<dyn EntityRepo<E>>,
    spec: QuerySpec<E>,
}

impl<E: Entity> Query<E> {
    pub(crate) fn new(store: Arc<dyn EntityRepo<E>>) -> Self {
        Self {
            store,
            spec: QuerySpec::new(),
        }
    }

    pub fn filter(mut self, predicate: Predicate<E::Column>) -> Self {
        self.spec = self.spec.filter(predicate);
        self
    }

    pub fn include(mut self, include: E::Include) -> Self {
        self.spec = self.spec.include(include);
        self
    }

    pub fn include_all(mut self, includes: &[E::Include]) -> Self {
        self.spec = self.spec.include_all(includes);
        self
    }

    pub fn order_by(mut self, column: E::Column, direction: Direction) -> Self {
        self.spec = self.spec.order_by(column, direction);
        self
    }

    pub fn skip(mut self, count: u32) -> Self {
        self.spec = self.spec.offset(count);
        self
    }

    pub fn take(mut self, count: u32) -> Self {
        self.spec = self.spec.limit(count);
        self
    }

    pub fn spec(&self) -> &QuerySpec<E> {
        &self.spec
    }

    pub async fn fetch_all(self) -> Result<Vec<E>, RepoError> {
        self.store.fetch(&self.spec).await
    }

    pub async fn first(self) -> Result<Option<E>, RepoError> {
        let spec = self.spec.limit(1);
        Ok(self.store.fetch(&spec).await?.into_iter().next())
    }

    pub async fn count(self) -> Result<u64, RepoError> {
        self.store.count(&self.spec).await
    }

    pub async fn exists(self) -> Result<bool, RepoError> {
        Ok(self.count().await? > 0)
    }
}

/// Writes staged in memory until [`Batch::commit`].
#[must_use = "a batch writes nothing until committed"]
pub struct Batch<E: Entity> {
    store: Arc<dyn EntityRepo<E>>,
    writes: Vec<Write<E>>,
}

impl<E: Entity> Batch<E> {
    pub(crate) fn new(store: Arc<dyn EntityRepo<E>>) -> Self {
        Self {
            store,
            writes: Vec::new(),
        }
    }

    pub fn create(mut self, entity: E) -> Self {
        self.writes.push(Write::Create(entity));
        self
    }

    pub fn update(mut self, entity: E) -> Self {
        self.writes.push(Write::Update(entity));
        self
    }

    pub fn delete(mut self, id: EntityId) -> Self {
        self.writes.push(Write::Delete(id));
        self
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Applies every staged write in one transaction. Returns created and
    /// updated entities in staging order.
    pub async fn commit(self) -> Result<Vec<E>, RepoError> {
        if self.writes.is_empty() {
            return Ok(Vec::new());
        }
        self.store.apply(self.writes).await
    }
}
