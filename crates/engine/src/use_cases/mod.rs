//! Use cases - one logic service per entity family.
//!
//! Controllers call these services and never touch repositories directly.
//! Every service speaks in view models and reports failures as [`LogicError`].

mod account;
mod announcement;
mod catalog;
mod fitness_class;
mod registration_record;

pub use account::AccountLogic;
pub use announcement::AnnouncementLogic;
pub use catalog::{CatalogLogic, FitnessClassTypeLogic, InstructorLogic, LocationLogic};
pub use fitness_class::FitnessClassLogic;
pub use registration_record::RegistrationRecordLogic;

use fitnessapp_domain::DomainError;
use fitnessapp_shared::ValidationErrors;

use crate::infrastructure::ports::RepoError;

/// Shared error type for logic services.
#[derive(Debug, thiserror::Error)]
pub enum LogicError {
    #[error("Not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Forbidden")]
    Forbidden,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl From<ValidationErrors> for LogicError {
    fn from(errors: ValidationErrors) -> Self {
        Self::InvalidInput(errors.to_string())
    }
}

impl LogicError {
    /// Maps a failed write: constraint failures become conflicts and a
    /// vanished row becomes `NotFound`.
    pub(crate) fn from_write(error: RepoError) -> Self {
        match error {
            RepoError::ConstraintViolation(message) => Self::Conflict(message),
            RepoError::Stale { .. } => Self::NotFound,
            other => Self::Repo(other),
        }
    }
}

/// Converts a stored count for a view.
pub(crate) fn view_count(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
