//! Studio announcements shown on the home page.

use std::sync::Arc;

use fitnessapp_domain::{Announcement, EntityId};
use fitnessapp_shared::{AnnouncementView, Validate};

use super::LogicError;
use crate::infrastructure::ports::ClockPort;
use crate::repositories::Repository;

pub struct AnnouncementLogic {
    announcements: Repository<Announcement>,
    clock: Arc<dyn ClockPort>,
}

impl AnnouncementLogic {
    pub fn new(announcements: Repository<Announcement>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            announcements,
            clock,
        }
    }

    /// Announcements that have not expired, newest first.
    pub async fn get_list(&self) -> Result<Vec<AnnouncementView>, LogicError> {
        let active = self
            .announcements
            .active(self.clock.now())
            .fetch_all()
            .await?;
        Ok(active.into_iter().map(Into::into).collect())
    }

    /// Every announcement including expired ones, newest first.
    pub async fn get_all(&self) -> Result<Vec<AnnouncementView>, LogicError> {
        let all = self.announcements.newest_first().fetch_all().await?;
        Ok(all.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: EntityId) -> Result<Option<AnnouncementView>, LogicError> {
        Ok(self
            .announcements
            .find_by_id(id, &[])
            .await?
            .map(Into::into))
    }

    /// Posts an announcement stamped with the current time.
    pub async fn create(&self, view: AnnouncementView) -> Result<AnnouncementView, LogicError> {
        view.validate()?;
        let mut announcement = Announcement::from(view);
        announcement.posted_at = self.clock.now();

        let created = self
            .announcements
            .create(announcement)
            .await
            .map_err(LogicError::from_write)?;

        tracing::info!(announcement_id = created.id, "Posted announcement");
        Ok(created.into())
    }

    /// Edits title, body and expiry. The posting time never changes.
    pub async fn update(
        &self,
        id: EntityId,
        view: AnnouncementView,
    ) -> Result<AnnouncementView, LogicError> {
        view.validate()?;
        let existing = self
            .announcements
            .find_by_id(id, &[])
            .await?
            .ok_or(LogicError::NotFound)?;

        let mut announcement = Announcement::from(view);
        announcement.id = id;
        announcement.posted_at = existing.posted_at;

        let updated = self
            .announcements
            .update(announcement)
            .await
            .map_err(LogicError::from_write)?;
        Ok(updated.into())
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), LogicError> {
        if self.announcements.find_by_id(id, &[]).await?.is_none() {
            return Err(LogicError::NotFound);
        }
        self.announcements
            .delete(id)
            .await
            .map_err(LogicError::from_write)
    }
}
