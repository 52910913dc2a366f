//! Named queries over fitness classes.

use chrono::{DateTime, Utc};
use fitnessapp_domain::{
    Direction, FitnessClass, FitnessClassColumn, FitnessClassInclude, Predicate,
};

use super::{Query, Repository};

impl Repository<FitnessClass> {
    /// Classes that have not ended by `now`, soonest first.
    pub fn upcoming(
        &self,
        now: DateTime<Utc>,
        includes: &[FitnessClassInclude],
    ) -> Query<FitnessClass> {
        self.find(Predicate::gt(FitnessClassColumn::EndTime, now), includes)
            .order_by(FitnessClassColumn::StartTime, Direction::Asc)
            .order_by(FitnessClassColumn::Id, Direction::Asc)
    }

    /// Every class, in schedule order.
    pub fn schedule(&self, includes: &[FitnessClassInclude]) -> Query<FitnessClass> {
        self.all(includes)
            .order_by(FitnessClassColumn::StartTime, Direction::Asc)
            .order_by(FitnessClassColumn::Id, Direction::Asc)
    }
}
