//! Fitness class entity - A scheduled session of a class type
//!
//! A class references its type, instructor and location by id. The matching
//! navigation fields stay `None` unless the relation was requested through
//! [`FitnessClassInclude`] when loading.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::query::Include;
use crate::{
    define_columns, DomainError, Entity, EntityId, FitnessClassType, Instructor, Location,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessClass {
    pub id: EntityId,
    pub fitness_class_type_id: EntityId,
    pub instructor_id: EntityId,
    pub location_id: EntityId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: i32,
    pub cancelled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_class_type: Option<FitnessClassType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<Instructor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

define_columns!(FitnessClassColumn {
    Id => "id",
    FitnessClassTypeId => "fitness_class_type_id",
    InstructorId => "instructor_id",
    LocationId => "location_id",
    StartTime => "start_time",
    EndTime => "end_time",
    Capacity => "capacity",
    Cancelled => "cancelled",
});

/// Relations of a fitness class that can be eagerly loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitnessClassInclude {
    FitnessClassType,
    Instructor,
    Location,
}

impl FitnessClassInclude {
    pub const ALL: [Self; 3] = [Self::FitnessClassType, Self::Instructor, Self::Location];
}

impl Include for FitnessClassInclude {
    fn name(self) -> &'static str {
        match self {
            Self::FitnessClassType => "FitnessClassType",
            Self::Instructor => "Instructor",
            Self::Location => "Location",
        }
    }
}

impl FitnessClass {
    pub fn new(
        fitness_class_type_id: EntityId,
        instructor_id: EntityId,
        location_id: EntityId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        capacity: i32,
    ) -> Self {
        Self {
            id: 0,
            fitness_class_type_id,
            instructor_id,
            location_id,
            start_time,
            end_time,
            capacity,
            cancelled: false,
            fitness_class_type: None,
            instructor: None,
            location: None,
        }
    }

    /// Checks the schedule and capacity invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.end_time <= self.start_time {
            return Err(DomainError::validation(
                "Class must end after it starts",
            ));
        }
        if self.capacity < 1 {
            return Err(DomainError::validation(
                "Class capacity must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now
    }

    /// Drops any eagerly loaded relations, leaving only the foreign keys.
    pub fn without_relations(mut self) -> Self {
        self.fitness_class_type = None;
        self.instructor = None;
        self.location = None;
        self
    }
}

impl Entity for FitnessClass {
    type Column = FitnessClassColumn;
    type Include = FitnessClassInclude;

    const NAME: &'static str = "FitnessClass";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
