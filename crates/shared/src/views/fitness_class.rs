//! Views of a scheduled class: the edit form, the list row and the sign-up page.

use chrono::{DateTime, Utc};
use fitnessapp_domain::{EntityId, FitnessClass, FitnessClassType, Instructor, Location};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{FitnessClassTypeView, InstructorView, LocationView};

/// Form model for creating and editing a class. Carries foreign keys only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_schedule"))]
pub struct FitnessClassEditView {
    #[serde(default)]
    pub id: EntityId,
    #[validate(range(min = 1))]
    pub fitness_class_type_id: EntityId,
    #[validate(range(min = 1))]
    pub instructor_id: EntityId,
    #[validate(range(min = 1))]
    pub location_id: EntityId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(range(min = 1, max = 500))]
    pub capacity: i32,
    #[serde(default)]
    pub cancelled: bool,
}

fn validate_schedule(view: &FitnessClassEditView) -> Result<(), ValidationError> {
    if view.end_time <= view.start_time {
        let mut error = ValidationError::new("schedule");
        error.message = Some("End time must be after start time".into());
        return Err(error);
    }
    Ok(())
}

/// The create/edit page: the current values, if any, and the choices for
/// each foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessClassFormView {
    pub class: Option<FitnessClassEditView>,
    pub class_types: Vec<FitnessClassTypeView>,
    pub instructors: Vec<InstructorView>,
    pub locations: Vec<LocationView>,
}

impl From<FitnessClass> for FitnessClassEditView {
    fn from(value: FitnessClass) -> Self {
        Self {
            id: value.id,
            fitness_class_type_id: value.fitness_class_type_id,
            instructor_id: value.instructor_id,
            location_id: value.location_id,
            start_time: value.start_time,
            end_time: value.end_time,
            capacity: value.capacity,
            cancelled: value.cancelled,
        }
    }
}

impl From<FitnessClassEditView> for FitnessClass {
    fn from(value: FitnessClassEditView) -> Self {
        Self {
            id: value.id,
            fitness_class_type_id: value.fitness_class_type_id,
            instructor_id: value.instructor_id,
            location_id: value.location_id,
            start_time: value.start_time,
            end_time: value.end_time,
            capacity: value.capacity,
            cancelled: value.cancelled,
            fitness_class_type: None,
            instructor: None,
            location: None,
        }
    }
}

/// A row in the class schedule with its relations expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessClassListView {
    pub id: EntityId,
    pub fitness_class_type: FitnessClassTypeView,
    pub instructor: InstructorView,
    pub location: LocationView,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: i32,
    pub cancelled: bool,
    #[serde(default)]
    pub registered_count: i64,
}

impl FitnessClassListView {
    pub fn with_registered_count(mut self, registered_count: i64) -> Self {
        self.registered_count = registered_count;
        self
    }
}

impl From<FitnessClass> for FitnessClassListView {
    /// Relations that were not loaded map to views holding only the id.
    fn from(value: FitnessClass) -> Self {
        let fitness_class_type = value.fitness_class_type.map_or_else(
            || FitnessClassTypeView {
                id: value.fitness_class_type_id,
                ..Default::default()
            },
            FitnessClassTypeView::from,
        );
        let instructor = value.instructor.map_or_else(
            || InstructorView {
                id: value.instructor_id,
                ..Default::default()
            },
            InstructorView::from,
        );
        let location = value.location.map_or_else(
            || LocationView {
                id: value.location_id,
                ..Default::default()
            },
            LocationView::from,
        );

        Self {
            id: value.id,
            fitness_class_type,
            instructor,
            location,
            start_time: value.start_time,
            end_time: value.end_time,
            capacity: value.capacity,
            cancelled: value.cancelled,
            registered_count: 0,
        }
    }
}

impl From<FitnessClassListView> for FitnessClass {
    /// Foreign keys come from the nested views' ids.
    fn from(value: FitnessClassListView) -> Self {
        Self {
            id: value.id,
            fitness_class_type_id: value.fitness_class_type.id,
            instructor_id: value.instructor.id,
            location_id: value.location.id,
            start_time: value.start_time,
            end_time: value.end_time,
            capacity: value.capacity,
            cancelled: value.cancelled,
            fitness_class_type: Some(FitnessClassType::from(value.fitness_class_type)),
            instructor: Some(Instructor::from(value.instructor)),
            location: Some(Location::from(value.location)),
        }
    }
}

/// What a member sees before joining a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessClassSignUpView {
    pub id: EntityId,
    pub class_type_name: String,
    pub instructor_name: String,
    pub location_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: i32,
    pub registered_count: i64,
    pub spots_remaining: i64,
    pub is_registered: bool,
    pub can_sign_up: bool,
    pub cancelled: bool,
}

impl FitnessClassSignUpView {
    /// Fills in the registration state for the viewing member.
    pub fn with_registration(
        mut self,
        registered_count: i64,
        is_registered: bool,
        now: DateTime<Utc>,
    ) -> Self {
        self.registered_count = registered_count;
        self.spots_remaining = (i64::from(self.capacity) - registered_count).max(0);
        self.is_registered = is_registered;
        self.can_sign_up = !self.cancelled
            && !is_registered
            && self.spots_remaining > 0
            && self.start_time > now;
        self
    }
}

impl From<FitnessClass> for FitnessClassSignUpView {
    fn from(value: FitnessClass) -> Self {
        Self {
            id: value.id,
            class_type_name: value
                .fitness_class_type
                .map(|class_type| class_type.name)
                .unwrap_or_default(),
            instructor_name: value
                .instructor
                .map(|instructor| instructor.full_name())
                .unwrap_or_default(),
            location_name: value
                .location
                .map(|location| location.name)
                .unwrap_or_default(),
            start_time: value.start_time,
            end_time: value.end_time,
            capacity: value.capacity,
            registered_count: 0,
            spots_remaining: i64::from(value.capacity),
            is_registered: false,
            can_sign_up: false,
            cancelled: value.cancelled,
        }
    }
}
