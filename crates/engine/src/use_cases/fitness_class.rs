//! Class scheduling and member sign-up.

use std::sync::Arc;

use fitnessapp_domain::{
    EntityId, FitnessClass, FitnessClassInclude, FitnessClassType, Instructor, Location,
    RegistrationRecord,
};
use fitnessapp_shared::{
    FitnessClassEditView, FitnessClassFormView, FitnessClassListView, FitnessClassSignUpView,
    RegistrationRecordView, Validate,
};

use super::{view_count, LogicError};
use crate::infrastructure::ports::{ClockPort, RegistrationRepo};
use crate::repositories::Repository;

pub struct FitnessClassLogic {
    classes: Repository<FitnessClass>,
    class_types: Repository<FitnessClassType>,
    instructors: Repository<Instructor>,
    locations: Repository<Location>,
    registrations: Repository<RegistrationRecord>,
    seats: Arc<dyn RegistrationRepo>,
    clock: Arc<dyn ClockPort>,
}

impl FitnessClassLogic {
    pub fn new(
        classes: Repository<FitnessClass>,
        class_types: Repository<FitnessClassType>,
        instructors: Repository<Instructor>,
        locations: Repository<Location>,
        registrations: Repository<RegistrationRecord>,
        seats: Arc<dyn RegistrationRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            classes,
            class_types,
            instructors,
            locations,
            registrations,
            seats,
            clock,
        }
    }

    /// Classes in schedule order with every relation and their registration
    /// counts. Classes that already ended are left out unless `include_past`.
    pub async fn get_list(
        &self,
        include_past: bool,
    ) -> Result<Vec<FitnessClassListView>, LogicError> {
        let query = if include_past {
            self.classes.schedule(&FitnessClassInclude::ALL)
        } else {
            self.classes
                .upcoming(self.clock.now(), &FitnessClassInclude::ALL)
        };
        let classes = query.fetch_all().await?;

        let ids: Vec<EntityId> = classes.iter().map(|c| c.id).collect();
        let counts = self.registrations.counts_by_class(&ids).await?;

        Ok(classes
            .into_iter()
            .map(|class| {
                let count = counts.get(&class.id).copied().unwrap_or(0);
                FitnessClassListView::from(class).with_registered_count(view_count(count))
            })
            .collect())
    }

    pub async fn get(&self, id: EntityId) -> Result<Option<FitnessClassListView>, LogicError> {
        let Some(class) = self
            .classes
            .find_by_id(id, &FitnessClassInclude::ALL)
            .await?
        else {
            return Ok(None);
        };

        let count = self.registrations.count_for_class(id).await?;
        Ok(Some(
            FitnessClassListView::from(class).with_registered_count(view_count(count)),
        ))
    }

    pub async fn get_for_edit(
        &self,
        id: EntityId,
    ) -> Result<Option<FitnessClassEditView>, LogicError> {
        Ok(self
            .classes
            .find_by_id(id, &[])
            .await?
            .map(FitnessClassEditView::from))
    }

    /// The choices offered by the create and edit forms.
    pub async fn form(
        &self,
        class: Option<FitnessClassEditView>,
    ) -> Result<FitnessClassFormView, LogicError> {
        use fitnessapp_domain::{
            Direction, FitnessClassTypeColumn, InstructorColumn, LocationColumn,
        };

        let class_types = self
            .class_types
            .all(&[])
            .order_by(FitnessClassTypeColumn::Name, Direction::Asc)
            .fetch_all()
            .await?;
        let instructors = self
            .instructors
            .all(&[])
            .order_by(InstructorColumn::LastName, Direction::Asc)
            .order_by(InstructorColumn::FirstName, Direction::Asc)
            .fetch_all()
            .await?;
        let locations = self
            .locations
            .all(&[])
            .order_by(LocationColumn::Name, Direction::Asc)
            .fetch_all()
            .await?;

        Ok(FitnessClassFormView {
            class,
            class_types: class_types.into_iter().map(Into::into).collect(),
            instructors: instructors.into_iter().map(Into::into).collect(),
            locations: locations.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn create(
        &self,
        view: FitnessClassEditView,
    ) -> Result<FitnessClassEditView, LogicError> {
        view.validate()?;
        let class = FitnessClass::from(view);
        class.validate()?;
        self.ensure_references(&class).await?;

        let created = self
            .classes
            .create(class)
            .await
            .map_err(LogicError::from_write)?;

        tracing::info!(
            class_id = created.id,
            start_time = %created.start_time,
            "Scheduled class"
        );
        Ok(created.into())
    }

    pub async fn update(
        &self,
        id: EntityId,
        view: FitnessClassEditView,
    ) -> Result<FitnessClassEditView, LogicError> {
        view.validate()?;
        let mut class = FitnessClass::from(view);
        class.id = id;
        class.validate()?;
        self.ensure_references(&class).await?;

        let updated = self
            .classes
            .update(class)
            .await
            .map_err(LogicError::from_write)?;
        Ok(updated.into())
    }

    /// Deletes a class together with its registrations.
    pub async fn delete(&self, id: EntityId) -> Result<(), LogicError> {
        if self.classes.find_by_id(id, &[]).await?.is_none() {
            return Err(LogicError::NotFound);
        }
        self.classes
            .delete(id)
            .await
            .map_err(LogicError::from_write)?;

        tracing::info!(class_id = id, "Deleted class");
        Ok(())
    }

    /// The sign-up page for `user_id`, or `None` when the class is unknown.
    pub async fn get_sign_up(
        &self,
        id: EntityId,
        user_id: EntityId,
    ) -> Result<Option<FitnessClassSignUpView>, LogicError> {
        let Some(class) = self
            .classes
            .find_by_id(id, &FitnessClassInclude::ALL)
            .await?
        else {
            return Ok(None);
        };

        let count = self.registrations.count_for_class(id).await?;
        let registered = self
            .registrations
            .find_for_user_and_class(user_id, id)
            .await?
            .is_some();

        Ok(Some(FitnessClassSignUpView::from(class).with_registration(
            view_count(count),
            registered,
            self.clock.now(),
        )))
    }

    /// Registers `user_id` for the class.
    ///
    /// The class must not be cancelled or started, must have a free spot,
    /// and the member must not already hold a place. The free-spot check and
    /// the insert happen atomically in the store.
    pub async fn sign_up(
        &self,
        id: EntityId,
        user_id: EntityId,
    ) -> Result<RegistrationRecordView, LogicError> {
        let class = self
            .classes
            .find_by_id(id, &[])
            .await?
            .ok_or(LogicError::NotFound)?;
        let now = self.clock.now();

        if class.cancelled {
            return Err(LogicError::Conflict(
                "This class has been cancelled".to_string(),
            ));
        }
        if class.has_started(now) {
            return Err(LogicError::Conflict(
                "This class has already started".to_string(),
            ));
        }
        if self
            .registrations
            .find_for_user_and_class(user_id, id)
            .await?
            .is_some()
        {
            return Err(LogicError::Conflict(
                "You are already registered for this class".to_string(),
            ));
        }

        let mut record = RegistrationRecord::new(id, user_id, now);
        let registered = self
            .seats
            .register_within_capacity(&mut record)
            .await
            .map_err(LogicError::from_write)?;
        if !registered {
            return Err(LogicError::Conflict("This class is full".to_string()));
        }

        tracing::info!(class_id = id, user_id, "Member signed up");
        Ok(record.into())
    }

    async fn ensure_references(&self, class: &FitnessClass) -> Result<(), LogicError> {
        if self
            .class_types
            .find_by_id(class.fitness_class_type_id, &[])
            .await?
            .is_none()
        {
            return Err(LogicError::InvalidInput(format!(
                "Unknown class type {}",
                class.fitness_class_type_id
            )));
        }
        if self
            .instructors
            .find_by_id(class.instructor_id, &[])
            .await?
            .is_none()
        {
            return Err(LogicError::InvalidInput(format!(
                "Unknown instructor {}",
                class.instructor_id
            )));
        }
        if self
            .locations
            .find_by_id(class.location_id, &[])
            .await?
            .is_none()
        {
            return Err(LogicError::InvalidInput(format!(
                "Unknown location {}",
                class.location_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use fitnessapp_domain::{Role, User};

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::persistence::{Database, SqliteRegistrationRepo};
    use crate::test_fixtures::{at, memory_db, repository, seed_catalog, seed_class, Catalog};

    struct Fixture {
        db: Database,
        catalog: Catalog,
        logic: FitnessClassLogic,
    }

    async fn fixture(now: DateTime<Utc>) -> Fixture {
        let db = memory_db().await;
        let catalog = seed_catalog(&db).await;
        let logic = FitnessClassLogic::new(
            repository(&db),
            repository(&db),
            repository(&db),
            repository(&db),
            repository(&db),
            Arc::new(SqliteRegistrationRepo::new(db.clone())),
            Arc::new(FixedClock(now)),
        );
        Fixture { db, catalog, logic }
    }

    async fn member(db: &Database, email: &str) -> User {
        repository::<User>(db)
            .create(User::new(email, "Member", "hash", Role::Member))
            .await
            .unwrap()
    }

    fn edit_view(catalog: &Catalog, hour: u32, capacity: i32) -> FitnessClassEditView {
        let start = at(2030, 3, 1, hour);
        FitnessClassEditView {
            id: 0,
            fitness_class_type_id: catalog.class_type.id,
            instructor_id: catalog.instructor.id,
            location_id: catalog.location.id,
            start_time: start,
            end_time: start + Duration::hours(1),
            capacity,
            cancelled: false,
        }
    }

    #[tokio::test]
    async fn list_hides_finished_classes_and_counts_registrations() {
        let f = fixture(at(2030, 3, 1, 12)).await;
        seed_class(&f.db, &f.catalog, 8).await;
        let later = seed_class(&f.db, &f.catalog, 15).await;
        let user = member(&f.db, "a@example.com").await;
        f.logic.sign_up(later.id, user.id).await.unwrap();

        let upcoming = f.logic.get_list(false).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, later.id);
        assert_eq!(upcoming[0].registered_count, 1);
        assert_eq!(upcoming[0].instructor.id, f.catalog.instructor.id);
        assert_eq!(upcoming[0].location.name, f.catalog.location.name);

        assert_eq!(f.logic.get_list(true).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_checks_schedule_and_references() {
        let f = fixture(at(2030, 1, 1, 0)).await;

        let created = f.logic.create(edit_view(&f.catalog, 9, 12)).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(
            f.logic.get_for_edit(created.id).await.unwrap(),
            Some(created.clone())
        );

        let mut backwards = edit_view(&f.catalog, 9, 12);
        backwards.end_time = backwards.start_time - Duration::minutes(5);
        assert!(matches!(
            f.logic.create(backwards).await.unwrap_err(),
            LogicError::InvalidInput(_)
        ));

        let mut orphan = edit_view(&f.catalog, 9, 12);
        orphan.instructor_id = 999;
        let err = f.logic.create(orphan).await.unwrap_err();
        assert!(matches!(err, LogicError::InvalidInput(ref m) if m.contains("instructor")));
    }

    #[tokio::test]
    async fn update_replaces_fields_of_existing_class() {
        let f = fixture(at(2030, 1, 1, 0)).await;
        let created = f.logic.create(edit_view(&f.catalog, 9, 12)).await.unwrap();

        let mut edit = edit_view(&f.catalog, 10, 20);
        edit.cancelled = true;
        let updated = f.logic.update(created.id, edit).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.capacity, 20);
        assert!(updated.cancelled);

        let missing = f
            .logic
            .update(999, edit_view(&f.catalog, 10, 20))
            .await
            .unwrap_err();
        assert!(matches!(missing, LogicError::NotFound));
    }

    #[tokio::test]
    async fn form_lists_every_choice() {
        let f = fixture(at(2030, 1, 1, 0)).await;

        let form = f.logic.form(None).await.unwrap();

        assert!(form.class.is_none());
        assert_eq!(form.class_types.len(), 1);
        assert_eq!(form.instructors.len(), 1);
        assert_eq!(form.locations.len(), 1);
    }

    #[tokio::test]
    async fn sign_up_registers_once() {
        let f = fixture(at(2030, 2, 1, 0)).await;
        let class = seed_class(&f.db, &f.catalog, 9).await;
        let user = member(&f.db, "a@example.com").await;

        let before = f.logic.get_sign_up(class.id, user.id).await.unwrap().unwrap();
        assert!(before.can_sign_up);
        assert_eq!(before.spots_remaining, i64::from(class.capacity));

        let record = f.logic.sign_up(class.id, user.id).await.unwrap();
        assert_eq!(record.fitness_class_id, class.id);
        assert_eq!(record.registered_at, at(2030, 2, 1, 0));

        let after = f.logic.get_sign_up(class.id, user.id).await.unwrap().unwrap();
        assert!(after.is_registered);
        assert!(!after.can_sign_up);

        let again = f.logic.sign_up(class.id, user.id).await.unwrap_err();
        assert!(matches!(again, LogicError::Conflict(ref m) if m.contains("already registered")));
    }

    #[tokio::test]
    async fn sign_up_rejects_full_cancelled_started_and_unknown_classes() {
        let f = fixture(at(2030, 3, 1, 12)).await;
        let first = member(&f.db, "a@example.com").await;
        let second = member(&f.db, "b@example.com").await;

        let full = f.logic.create(edit_view(&f.catalog, 15, 1)).await.unwrap();
        f.logic.sign_up(full.id, first.id).await.unwrap();
        let err = f.logic.sign_up(full.id, second.id).await.unwrap_err();
        assert!(matches!(err, LogicError::Conflict(ref m) if m.contains("full")));

        let mut cancelled = edit_view(&f.catalog, 16, 10);
        cancelled.cancelled = true;
        let cancelled = f.logic.create(cancelled).await.unwrap();
        let err = f.logic.sign_up(cancelled.id, first.id).await.unwrap_err();
        assert!(matches!(err, LogicError::Conflict(ref m) if m.contains("cancelled")));

        let started = f.logic.create(edit_view(&f.catalog, 11, 10)).await.unwrap();
        let err = f.logic.sign_up(started.id, first.id).await.unwrap_err();
        assert!(matches!(err, LogicError::Conflict(ref m) if m.contains("started")));

        assert!(matches!(
            f.logic.sign_up(999, first.id).await.unwrap_err(),
            LogicError::NotFound
        ));
        assert!(f.logic.get_sign_up(999, first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn simultaneous_sign_ups_for_the_last_spot_admit_one_member() {
        let f = fixture(at(2030, 3, 1, 12)).await;
        let first = member(&f.db, "a@example.com").await;
        let second = member(&f.db, "b@example.com").await;
        let class = f.logic.create(edit_view(&f.catalog, 15, 1)).await.unwrap();

        let (a, b) = tokio::join!(
            f.logic.sign_up(class.id, first.id),
            f.logic.sign_up(class.id, second.id)
        );

        let (admitted, refused): (Vec<_>, Vec<_>) = [a, b].into_iter().partition(Result::is_ok);
        assert_eq!(admitted.len(), 1);
        for result in refused {
            assert!(matches!(result, Err(LogicError::Conflict(ref m)) if m.contains("full")));
        }
        assert_eq!(
            repository::<RegistrationRecord>(&f.db)
                .count_for_class(class.id)
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn delete_removes_class_and_registrations() {
        let f = fixture(at(2030, 2, 1, 0)).await;
        let class = seed_class(&f.db, &f.catalog, 9).await;
        let user = member(&f.db, "a@example.com").await;
        f.logic.sign_up(class.id, user.id).await.unwrap();

        f.logic.delete(class.id).await.unwrap();

        assert!(f.logic.get(class.id).await.unwrap().is_none());
        assert_eq!(
            repository::<RegistrationRecord>(&f.db)
                .all(&[])
                .count()
                .await
                .unwrap(),
            0
        );
        assert!(matches!(
            f.logic.delete(class.id).await.unwrap_err(),
            LogicError::NotFound
        ));
    }
}
