//! User entity - The identity record owned by the account subsystem

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{define_columns, DomainError, Entity, EntityId, NoInclude};

/// Authorization role. Admins manage the class catalog; members sign up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Member => "Member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Member" => Ok(Self::Member),
            other => Err(DomainError::parse(format!("Unknown role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    /// Stored lower-cased; unique.
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
}

define_columns!(UserColumn {
    Id => "id",
    Email => "email",
    DisplayName => "display_name",
    PasswordHash => "password_hash",
    Role => "role",
});

impl User {
    pub fn new(
        email: &str,
        display_name: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: 0,
            email: Self::normalize_email(email),
            display_name: display_name.into(),
            password_hash: password_hash.into(),
            role,
        }
    }

    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl Entity for User {
    type Column = UserColumn;
    type Include = NoInclude;

    const NAME: &'static str = "User";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
