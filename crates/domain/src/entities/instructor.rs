//! Instructor entity

use serde::{Deserialize, Serialize};

use crate::{define_columns, Entity, EntityId, NoInclude};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: String,
}

define_columns!(InstructorColumn {
    Id => "id",
    FirstName => "first_name",
    LastName => "last_name",
    Email => "email",
    Bio => "bio",
});

impl Instructor {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            bio: String::new(),
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Instructor {
    type Column = InstructorColumn;
    type Include = NoInclude;

    const NAME: &'static str = "Instructor";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
