//! Named queries over announcements.

use chrono::{DateTime, Utc};
use fitnessapp_domain::{Announcement, AnnouncementColumn, Direction, Predicate};

use super::{Query, Repository};

impl Repository<Announcement> {
    /// Announcements not yet expired at `now`, newest first.
    pub fn active(&self, now: DateTime<Utc>) -> Query<Announcement> {
        self.find(
            Predicate::is_null(AnnouncementColumn::ExpiresAt)
                .or(Predicate::gt(AnnouncementColumn::ExpiresAt, now)),
            &[],
        )
        .order_by(AnnouncementColumn::PostedAt, Direction::Desc)
    }

    pub fn newest_first(&self) -> Query<Announcement> {
        self.all(&[])
            .order_by(AnnouncementColumn::PostedAt, Direction::Desc)
    }
}
