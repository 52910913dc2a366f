//! Announcement entity - News shown to members on the home page

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{define_columns, Entity, EntityId, NoInclude};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: EntityId,
    pub title: String,
    pub body: String,
    pub posted_at: DateTime<Utc>,
    /// No expiry means the announcement stays visible until deleted.
    pub expires_at: Option<DateTime<Utc>>,
}

define_columns!(AnnouncementColumn {
    Id => "id",
    Title => "title",
    Body => "body",
    PostedAt => "posted_at",
    ExpiresAt => "expires_at",
});

impl Announcement {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        posted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            body: body.into(),
            posted_at,
            expires_at: None,
        }
    }

    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |expires_at| expires_at > now)
    }
}

impl Entity for Announcement {
    type Column = AnnouncementColumn;
    type Include = NoInclude;

    const NAME: &'static str = "Announcement";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
