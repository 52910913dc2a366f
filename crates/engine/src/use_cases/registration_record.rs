//! Listing and cancelling class registrations.

use fitnessapp_domain::{
    Direction, EntityId, RegistrationRecord, RegistrationRecordColumn, RegistrationRecordInclude,
    User,
};
use fitnessapp_shared::RegistrationRecordView;

use super::LogicError;
use crate::repositories::Repository;

pub struct RegistrationRecordLogic {
    registrations: Repository<RegistrationRecord>,
}

impl RegistrationRecordLogic {
    pub fn new(registrations: Repository<RegistrationRecord>) -> Self {
        Self { registrations }
    }

    /// One member's registrations, newest first.
    pub async fn get_list_for_user(
        &self,
        user_id: EntityId,
    ) -> Result<Vec<RegistrationRecordView>, LogicError> {
        let records = self
            .registrations
            .for_user(
                user_id,
                &[
                    RegistrationRecordInclude::FitnessClass,
                    RegistrationRecordInclude::User,
                ],
            )
            .fetch_all()
            .await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Every registration, newest first.
    pub async fn get_list(&self) -> Result<Vec<RegistrationRecordView>, LogicError> {
        let records = self
            .registrations
            .all(&[
                RegistrationRecordInclude::FitnessClass,
                RegistrationRecordInclude::User,
            ])
            .order_by(RegistrationRecordColumn::RegisteredAt, Direction::Desc)
            .fetch_all()
            .await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// What `user` may see: everything for admins, otherwise their own.
    pub async fn get_list_visible_to(
        &self,
        user: &User,
    ) -> Result<Vec<RegistrationRecordView>, LogicError> {
        if user.is_admin() {
            self.get_list().await
        } else {
            self.get_list_for_user(user.id).await
        }
    }

    /// Cancels a registration. Members may only cancel their own.
    pub async fn cancel(&self, id: EntityId, user: &User) -> Result<(), LogicError> {
        let record = self
            .registrations
            .find_by_id(id, &[])
            .await?
            .ok_or(LogicError::NotFound)?;

        if record.user_id != user.id && !user.is_admin() {
            tracing::warn!(
                registration_id = id,
                user_id = user.id,
                "Refused to cancel another member's registration"
            );
            return Err(LogicError::Forbidden);
        }

        self.registrations
            .delete_entity(&record)
            .await
            .map_err(LogicError::from_write)?;

        tracing::info!(
            registration_id = id,
            class_id = record.fitness_class_id,
            "Cancelled registration"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitnessapp_domain::Role;

    use crate::infrastructure::persistence::Database;
    use crate::test_fixtures::{at, memory_db, repository, seed_catalog, seed_class};

    async fn user(db: &Database, email: &str, role: Role) -> User {
        repository::<User>(db)
            .create(User::new(email, email, "hash", role))
            .await
            .unwrap()
    }

    async fn register(
        db: &Database,
        class_id: EntityId,
        user_id: EntityId,
        day: u32,
    ) -> RegistrationRecord {
        repository::<RegistrationRecord>(db)
            .create(RegistrationRecord::new(class_id, user_id, at(2030, 2, day, 9)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn members_see_their_own_registrations_and_admins_see_all() {
        let db = memory_db().await;
        let catalog = seed_catalog(&db).await;
        let morning = seed_class(&db, &catalog, 9).await;
        let evening = seed_class(&db, &catalog, 18).await;
        let ana = user(&db, "ana@example.com", Role::Member).await;
        let bo = user(&db, "bo@example.com", Role::Member).await;
        let admin = user(&db, "admin@example.com", Role::Admin).await;
        register(&db, morning.id, ana.id, 1).await;
        register(&db, evening.id, ana.id, 2).await;
        register(&db, morning.id, bo.id, 3).await;
        let logic = RegistrationRecordLogic::new(repository(&db));

        let mine = logic.get_list_visible_to(&ana).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].fitness_class_id, evening.id);
        assert_eq!(mine[0].class_start_time, Some(evening.start_time));
        assert_eq!(mine[0].user_display_name.as_deref(), Some("ana@example.com"));

        let everything = logic.get_list_visible_to(&admin).await.unwrap();
        assert_eq!(everything.len(), 3);
        assert_eq!(everything[0].user_id, bo.id);
    }

    #[tokio::test]
    async fn members_cancel_only_their_own_registrations() {
        let db = memory_db().await;
        let catalog = seed_catalog(&db).await;
        let class = seed_class(&db, &catalog, 9).await;
        let ana = user(&db, "ana@example.com", Role::Member).await;
        let bo = user(&db, "bo@example.com", Role::Member).await;
        let admin = user(&db, "admin@example.com", Role::Admin).await;
        let anas = register(&db, class.id, ana.id, 1).await;
        let bos = register(&db, class.id, bo.id, 2).await;
        let logic = RegistrationRecordLogic::new(repository(&db));

        assert!(matches!(
            logic.cancel(bos.id, &ana).await.unwrap_err(),
            LogicError::Forbidden
        ));
        logic.cancel(anas.id, &ana).await.unwrap();
        logic.cancel(bos.id, &admin).await.unwrap();

        assert!(logic.get_list().await.unwrap().is_empty());
        assert!(matches!(
            logic.cancel(anas.id, &ana).await.unwrap_err(),
            LogicError::NotFound
        ));
    }
}
