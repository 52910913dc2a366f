use chrono::{DateTime, Utc};
use fitnessapp_domain::{Announcement, EntityId};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementView {
    #[serde(default)]
    pub id: EntityId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 10000))]
    pub body: String,
    /// Set by the server; ignored on input.
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Announcement> for AnnouncementView {
    fn from(value: Announcement) -> Self {
        Self {
            id: value.id,
            title: value.title,
            body: value.body,
            posted_at: Some(value.posted_at),
            expires_at: value.expires_at,
        }
    }
}

impl From<AnnouncementView> for Announcement {
    fn from(value: AnnouncementView) -> Self {
        Self {
            id: value.id,
            title: value.title,
            body: value.body,
            posted_at: value.posted_at.unwrap_or_default(),
            expires_at: value.expires_at,
        }
    }
}
