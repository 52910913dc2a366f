//! Location entity - A room or venue where classes take place

use serde::{Deserialize, Serialize};

use crate::{define_columns, Entity, EntityId, NoInclude};

/// A venue that hosts fitness classes. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: EntityId,
    pub name: String,
    pub address: String,
    pub room: String,
}

define_columns!(LocationColumn {
    Id => "id",
    Name => "name",
    Address => "address",
    Room => "room",
});

impl Location {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            address: address.into(),
            room: room.into(),
        }
    }
}

impl Entity for Location {
    type Column = LocationColumn;
    type Include = NoInclude;

    const NAME: &'static str = "Location";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
