//! Views for the catalog entities: class types, instructors, locations.

use fitnessapp_domain::{EntityId, FitnessClassType, Instructor, Location};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FitnessClassTypeView {
    #[serde(default)]
    pub id: EntityId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
}

impl From<FitnessClassType> for FitnessClassTypeView {
    fn from(value: FitnessClassType) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}

impl From<FitnessClassTypeView> for FitnessClassType {
    fn from(value: FitnessClassTypeView) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InstructorView {
    #[serde(default)]
    pub id: EntityId,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub bio: String,
}

impl From<Instructor> for InstructorView {
    fn from(value: Instructor) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            bio: value.bio,
        }
    }
}

impl From<InstructorView> for Instructor {
    fn from(value: InstructorView) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            bio: value.bio,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationView {
    #[serde(default)]
    pub id: EntityId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub address: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub room: String,
}

impl From<Location> for LocationView {
    fn from(value: Location) -> Self {
        Self {
            id: value.id,
            name: value.name,
            address: value.address,
            room: value.room,
        }
    }
}

impl From<LocationView> for Location {
    fn from(value: LocationView) -> Self {
        Self {
            id: value.id,
            name: value.name,
            address: value.address,
            room: value.room,
        }
    }
}
