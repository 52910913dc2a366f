//! Fitness class type entity - The kind of class on offer (yoga, spin, ...)

use serde::{Deserialize, Serialize};

use crate::{define_columns, Entity, EntityId, NoInclude};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessClassType {
    pub id: EntityId,
    pub name: String,
    pub description: String,
}

define_columns!(FitnessClassTypeColumn {
    Id => "id",
    Name => "name",
    Description => "description",
});

impl FitnessClassType {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Entity for FitnessClassType {
    type Column = FitnessClassTypeColumn;
    type Include = NoInclude;

    const NAME: &'static str = "FitnessClassType";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
