//! User domain models and parameters.
//!
//! Provides domain models for local users that log in through Discord. Includes parameter
//! types for user creation during first login.

use chrono::{DateTime, Utc};

use crate::model::user::UserDto;

/// Local user account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Local user id.
    pub id: i32,
    /// Unique display name, derived from the Discord username on creation.
    pub name: String,
    /// Email address reported by Discord, if any.
    pub email: Option<String>,
    /// Discord avatar hash from the most recent login.
    pub avatar_hash: Option<String>,
    /// Whether the user has admin privileges.
    pub admin: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the user last logged in.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            avatar_hash: self.avatar_hash,
            admin: self.admin,
            last_login_at: self.last_login_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            avatar_hash: entity.avatar_hash,
            admin: entity.admin,
            created_at: entity.created_at,
            last_login_at: entity.last_login_at,
        }
    }
}

/// Parameters for creating a user on first login.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    /// Unique display name.
    pub name: String,
    /// Email address reported by Discord.
    pub email: Option<String>,
    /// Discord avatar hash.
    pub avatar_hash: Option<String>,
    /// Whether to grant admin privileges.
    pub admin: bool,
}
