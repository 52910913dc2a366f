//! Registration, sign-in sessions and admin seeding.

use std::sync::Arc;

use chrono::Duration;
use fitnessapp_domain::{Role, User};
use fitnessapp_shared::{LoginRequest, RegisterRequest, UserView, Validate};
use uuid::Uuid;

use super::LogicError;
use crate::infrastructure::password::{hash_password, verify_password};
use crate::infrastructure::ports::{ClockPort, Session, SessionRepo};
use crate::repositories::Repository;

const INVALID_LOGIN: &str = "Invalid login attempt";

pub struct AccountLogic {
    users: Repository<User>,
    sessions: Arc<dyn SessionRepo>,
    clock: Arc<dyn ClockPort>,
    session_ttl: Duration,
}

impl AccountLogic {
    pub fn new(
        users: Repository<User>,
        sessions: Arc<dyn SessionRepo>,
        clock: Arc<dyn ClockPort>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            clock,
            session_ttl,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Creates a member account. The email must not be in use.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserView, LogicError> {
        request.validate()?;
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(LogicError::Conflict(
                "Email is already registered".to_string(),
            ));
        }

        let user = User::new(
            &request.email,
            request.display_name.trim(),
            hash_password(&request.password),
            Role::Member,
        );
        let created = self
            .users
            .create(user)
            .await
            .map_err(LogicError::from_write)?;

        tracing::info!(user_id = created.id, "Registered member");
        Ok(created.into())
    }

    /// Verifies credentials and opens a session.
    pub async fn login(&self, request: &LoginRequest) -> Result<(Session, User), LogicError> {
        if request.validate().is_err() {
            return Err(LogicError::InvalidInput(INVALID_LOGIN.to_string()));
        }

        let user = match self.users.find_by_email(&request.email).await? {
            Some(user) if verify_password(&request.password, &user.password_hash) => user,
            _ => {
                tracing::warn!("Failed sign-in attempt");
                return Err(LogicError::InvalidInput(INVALID_LOGIN.to_string()));
            }
        };

        let now = self.clock.now();
        let purged = self.sessions.delete_expired(now).await?;
        if purged > 0 {
            tracing::debug!(purged, "Purged expired sessions");
        }

        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            user_id: user.id,
            created_at: now,
            expires_at: now + self.session_ttl,
        };
        self.sessions.create(&session).await?;

        tracing::info!(user_id = user.id, "Signed in");
        Ok((session, user))
    }

    pub async fn logout(&self, token: &str) -> Result<(), LogicError> {
        self.sessions.delete(token).await?;
        Ok(())
    }

    /// The user behind a live session token.
    pub async fn current_user(&self, token: &str) -> Result<Option<User>, LogicError> {
        let Some(session) = self.sessions.get(token).await? else {
            return Ok(None);
        };

        if session.is_expired(self.clock.now()) {
            self.sessions.delete(token).await?;
            return Ok(None);
        }

        Ok(self.users.find_by_id(session.user_id, &[]).await?)
    }

    /// Creates the admin account unless one with this email exists.
    /// Returns whether an account was created.
    pub async fn seed_admin(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<bool, LogicError> {
        if self.users.find_by_email(email).await?.is_some() {
            tracing::debug!("Admin account already present");
            return Ok(false);
        }

        let admin = User::new(email, display_name, hash_password(password), Role::Admin);
        let created = self
            .users
            .create(admin)
            .await
            .map_err(LogicError::from_write)?;

        tracing::info!(user_id = created.id, "Seeded admin account");
        Ok(true)
    }
}
