//! Catalog use cases: class types, instructors and locations.
//!
//! All three are plain records edited by admins, so one generic service
//! covers them.

use std::marker::PhantomData;

use fitnessapp_domain::{
    Direction, Entity, EntityId, FitnessClassType, FitnessClassTypeColumn, Instructor,
    InstructorColumn, Location, LocationColumn,
};
use fitnessapp_shared::{FitnessClassTypeView, InstructorView, LocationView, Validate};

use super::LogicError;
use crate::infrastructure::ports::RepoError;
use crate::repositories::Repository;

pub type FitnessClassTypeLogic = CatalogLogic<FitnessClassType, FitnessClassTypeView>;
pub type InstructorLogic = CatalogLogic<Instructor, InstructorView>;
pub type LocationLogic = CatalogLogic<Location, LocationView>;

/// CRUD over one catalog entity, speaking in its view model.
pub struct CatalogLogic<E: Entity, V> {
    repo: Repository<E>,
    order: Vec<E::Column>,
    _view: PhantomData<fn() -> V>,
}

impl<E, V> CatalogLogic<E, V>
where
    E: Entity + From<V>,
    V: From<E> + Validate,
{
    /// `order` lists the columns the index is sorted by.
    pub fn new(repo: Repository<E>, order: Vec<E::Column>) -> Self {
        Self {
            repo,
            order,
            _view: PhantomData,
        }
    }

    pub async fn get_list(&self) -> Result<Vec<V>, LogicError> {
        let query = self
            .order
            .iter()
            .fold(self.repo.all(&[]), |query, column| {
                query.order_by(*column, Direction::Asc)
            });
        Ok(query.fetch_all().await?.into_iter().map(V::from).collect())
    }

    pub async fn get(&self, id: EntityId) -> Result<Option<V>, LogicError> {
        Ok(self.repo.find_by_id(id, &[]).await?.map(V::from))
    }

    pub async fn create(&self, view: V) -> Result<V, LogicError> {
        view.validate()?;
        let created = self
            .repo
            .create(E::from(view))
            .await
            .map_err(LogicError::from_write)?;

        tracing::info!(entity = E::NAME, id = created.id(), "Created");
        Ok(V::from(created))
    }

    pub async fn update(&self, id: EntityId, view: V) -> Result<V, LogicError> {
        view.validate()?;
        let mut entity = E::from(view);
        entity.set_id(id);

        let updated = self
            .repo
            .update(entity)
            .await
            .map_err(LogicError::from_write)?;
        Ok(V::from(updated))
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), LogicError> {
        if self.repo.find_by_id(id, &[]).await?.is_none() {
            return Err(LogicError::NotFound);
        }

        self.repo.delete(id).await.map_err(|e| match e {
            RepoError::ConstraintViolation(_) => {
                LogicError::Conflict(format!("{} {id} is still in use", E::NAME))
            }
            other => LogicError::from_write(other),
        })?;

        tracing::info!(entity = E::NAME, id, "Deleted");
        Ok(())
    }
}

impl FitnessClassTypeLogic {
    pub fn for_class_types(repo: Repository<FitnessClassType>) -> Self {
        Self::new(repo, vec![FitnessClassTypeColumn::Name])
    }
}

impl InstructorLogic {
    pub fn for_instructors(repo: Repository<Instructor>) -> Self {
        Self::new(
            repo,
            vec![InstructorColumn::LastName, InstructorColumn::FirstName],
        )
    }
}

impl LocationLogic {
    pub fn for_locations(repo: Repository<Location>) -> Self {
        Self::new(repo, vec![LocationColumn::Name])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{memory_db, repository, seed_catalog, seed_class};

    fn location_view(name: &str) -> LocationView {
        LocationView {
            name: name.to_string(),
            address: "1 Main St".to_string(),
            ..LocationView::default()
        }
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let db = memory_db().await;
        let logic = LocationLogic::for_locations(repository(&db));
        for name in ["Pool", "Annex", "Gym"] {
            logic.create(location_view(name)).await.unwrap();
        }

        let names: Vec<String> = logic
            .get_list()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Annex", "Gym", "Pool"]);
    }

    #[tokio::test]
    async fn invalid_views_are_rejected_before_storage() {
        let db = memory_db().await;
        let logic = LocationLogic::for_locations(repository(&db));

        let err = logic.create(location_view("")).await.unwrap_err();

        assert!(matches!(err, LogicError::InvalidInput(_)));
        assert!(logic.get_list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_names_conflict() {
        let db = memory_db().await;
        let logic = LocationLogic::for_locations(repository(&db));
        logic.create(location_view("Gym")).await.unwrap();

        let err = logic.create(location_view("Gym")).await.unwrap_err();
        assert!(matches!(err, LogicError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_uses_the_path_identity() {
        let db = memory_db().await;
        let logic = LocationLogic::for_locations(repository(&db));
        let created = logic.create(location_view("Gym")).await.unwrap();

        let mut edit = location_view("Main Gym");
        edit.id = 999;
        let updated = logic.update(created.id, edit).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(
            logic.get(created.id).await.unwrap().map(|l| l.name),
            Some("Main Gym".to_string())
        );

        let missing = logic.update(999, location_view("Nowhere")).await.unwrap_err();
        assert!(matches!(missing, LogicError::NotFound));
    }

    #[tokio::test]
    async fn instructors_sort_by_last_then_first_name() {
        let db = memory_db().await;
        let logic = InstructorLogic::for_instructors(repository(&db));
        for (first, last) in [("Zoe", "Adams"), ("Amy", "Baker"), ("Ben", "Adams")] {
            logic
                .create(InstructorView {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: format!("{}@example.com", first.to_lowercase()),
                    ..InstructorView::default()
                })
                .await
                .unwrap();
        }

        let names: Vec<String> = logic
            .get_list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.first_name)
            .collect();
        assert_eq!(names, vec!["Ben", "Zoe", "Amy"]);
    }

    #[tokio::test]
    async fn delete_reports_missing_and_referenced_rows() {
        let db = memory_db().await;
        let catalog = seed_catalog(&db).await;
        seed_class(&db, &catalog, 9).await;
        let logic = FitnessClassTypeLogic::for_class_types(repository(&db));

        assert!(matches!(
            logic.delete(999).await.unwrap_err(),
            LogicError::NotFound
        ));
        assert!(matches!(
            logic.delete(catalog.class_type.id).await.unwrap_err(),
            LogicError::Conflict(_)
        ));

        let spare = logic
            .create(FitnessClassTypeView {
                name: "Pilates".to_string(),
                ..FitnessClassTypeView::default()
            })
            .await
            .unwrap();
        logic.delete(spare.id).await.unwrap();
        assert!(logic.get(spare.id).await.unwrap().is_none());
    }
}
