//! Named queries over user accounts.

use fitnessapp_domain::{Predicate, User, UserColumn};

use super::Repository;
use crate::infrastructure::ports::RepoError;

impl Repository<User> {
    /// Looks up an account by email, ignoring case and surrounding spaces.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        self.find(
            Predicate::eq(UserColumn::Email, User::normalize_email(email)),
            &[],
        )
        .first()
        .await
    }
}
