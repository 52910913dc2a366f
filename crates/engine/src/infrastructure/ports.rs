//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Entity storage (generic over every persisted record)
//! - Sign-in sessions
//! - Clock (for testing)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitnessapp_domain::{Entity, EntityId, QuerySpec, RegistrationRecord};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error during {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    /// An update or delete matched no stored row.
    #[error("{entity_type} {id} no longer exists")]
    Stale {
        entity_type: &'static str,
        id: EntityId,
    },
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl RepoError {
    pub fn database(operation: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Database {
            operation,
            message: error.to_string(),
        }
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        Self::ConstraintViolation(message.into())
    }

    pub fn stale(entity_type: &'static str, id: EntityId) -> Self {
        Self::Stale { entity_type, id }
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

// =============================================================================
// Infrastructure Types
// =============================================================================

/// One staged change inside an atomic batch.
#[derive(Debug, Clone)]
pub enum Write<E> {
    /// Persist a new record; any identity on the value is ignored.
    Create(E),
    /// Overwrite an existing record by identity.
    Update(E),
    /// Remove the record with this identity. A missing record is skipped,
    /// matching a single delete by id.
    Delete(EntityId),
}

/// A signed-in browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: EntityId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

// =============================================================================
// Database Ports
// =============================================================================

/// Storage for one entity type.
///
/// Every mutating method runs in its own transaction and commits before
/// returning.
#[async_trait]
pub trait EntityRepo<E: Entity>: Send + Sync {
    async fn fetch(&self, spec: &QuerySpec<E>) -> Result<Vec<E>, RepoError>;

    /// Counts matching rows. Includes, ordering and window are ignored.
    async fn count(&self, spec: &QuerySpec<E>) -> Result<u64, RepoError>;

    /// Inserts a transient entity (assigning its identity) or updates a
    /// persisted one.
    async fn save(&self, entity: &mut E) -> Result<(), RepoError>;

    /// Removes the row carrying this entity's identity.
    async fn remove(&self, entity: &E) -> Result<(), RepoError>;

    /// Runs an empty unit of work. Nothing is pending between calls, so this
    /// only confirms the store accepts a commit.
    async fn commit(&self) -> Result<(), RepoError>;

    /// Applies every write in one transaction and returns created and
    /// updated entities in order. Nothing is applied if any write fails.
    async fn apply(&self, writes: Vec<Write<E>>) -> Result<Vec<E>, RepoError>;
}

/// Registrations that must respect class capacity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepo: Send + Sync {
    /// Inserts the record only while its class has a free place, assigning
    /// its identity. Returns `false` when the class is already full.
    ///
    /// The capacity check and the insert are one statement, so concurrent
    /// sign-ups cannot overfill a class.
    async fn register_within_capacity(
        &self,
        record: &mut RegistrationRecord,
    ) -> Result<bool, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepo: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), RepoError>;
    async fn get(&self, token: &str) -> Result<Option<Session>, RepoError>;
    async fn delete(&self, token: &str) -> Result<(), RepoError>;
    /// Removes expired sessions, returning how many were dropped.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepoError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
