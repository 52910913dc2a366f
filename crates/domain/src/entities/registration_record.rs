//! Registration record entity - A member's place in a class

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::Include;
use crate::{define_columns, Entity, EntityId, FitnessClass, User};

/// Links one user to one fitness class. A user holds at most one record per
/// class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub id: EntityId,
    pub fitness_class_id: EntityId,
    pub user_id: EntityId,
    pub registered_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_class: Option<FitnessClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

define_columns!(RegistrationRecordColumn {
    Id => "id",
    FitnessClassId => "fitness_class_id",
    UserId => "user_id",
    RegisteredAt => "registered_at",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationRecordInclude {
    FitnessClass,
    User,
}

impl Include for RegistrationRecordInclude {
    fn name(self) -> &'static str {
        match self {
            Self::FitnessClass => "FitnessClass",
            Self::User => "User",
        }
    }
}

impl RegistrationRecord {
    pub fn new(
        fitness_class_id: EntityId,
        user_id: EntityId,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            fitness_class_id,
            user_id,
            registered_at,
            fitness_class: None,
            user: None,
        }
    }
}

impl Entity for RegistrationRecord {
    type Column = RegistrationRecordColumn;
    type Include = RegistrationRecordInclude;

    const NAME: &'static str = "RegistrationRecord";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
