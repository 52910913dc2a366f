//! Named queries over class registrations.

use std::collections::HashMap;

use fitnessapp_domain::{
    Direction, EntityId, Predicate, RegistrationRecord, RegistrationRecordColumn,
    RegistrationRecordInclude,
};

use super::{Query, Repository};
use crate::infrastructure::ports::RepoError;

impl Repository<RegistrationRecord> {
    pub async fn count_for_class(&self, class_id: EntityId) -> Result<u64, RepoError> {
        self.find(
            Predicate::eq(RegistrationRecordColumn::FitnessClassId, class_id),
            &[],
        )
        .count()
        .await
    }

    /// Registration counts keyed by class. Classes without registrations are
    /// absent from the map.
    pub async fn counts_by_class(
        &self,
        class_ids: &[EntityId],
    ) -> Result<HashMap<EntityId, u64>, RepoError> {
        if class_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let records = self
            .find(
                Predicate::is_in(
                    RegistrationRecordColumn::FitnessClassId,
                    class_ids.iter().copied(),
                ),
                &[],
            )
            .fetch_all()
            .await?;

        Ok(records.iter().fold(HashMap::new(), |mut counts, record| {
            *counts.entry(record.fitness_class_id).or_insert(0) += 1;
            counts
        }))
    }

    pub async fn find_for_user_and_class(
        &self,
        user_id: EntityId,
        class_id: EntityId,
    ) -> Result<Option<RegistrationRecord>, RepoError> {
        self.find(
            Predicate::eq(RegistrationRecordColumn::UserId, user_id).and(Predicate::eq(
                RegistrationRecordColumn::FitnessClassId,
                class_id,
            )),
            &[],
        )
        .first()
        .await
    }

    /// A user's registrations, most recent first.
    pub fn for_user(
        &self,
        user_id: EntityId,
        includes: &[RegistrationRecordInclude],
    ) -> Query<RegistrationRecord> {
        self.find(Predicate::eq(RegistrationRecordColumn::UserId, user_id), includes)
            .order_by(RegistrationRecordColumn::RegisteredAt, Direction::Desc)
    }
}
