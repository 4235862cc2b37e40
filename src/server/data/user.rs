//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing local user records, with
//! conversion between entity models and domain models at the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect,
};

use crate::server::model::user::{CreateUserParam, User};

/// Repository providing database operations for user management.
///
/// Works on a plain connection as well as inside a transaction.
pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user.
    ///
    /// # Arguments
    /// - `param` - Name, email, avatar hash and admin flag of the new user
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error during insert, including a duplicate name
    pub async fn create(&self, param: CreateUserParam) -> Result<User, DbErr> {
        let entity = entity::prelude::User::insert(entity::user::ActiveModel {
            name: ActiveValue::Set(param.name),
            email: ActiveValue::Set(param.email.as_deref().map(normalize_email)),
            avatar_hash: ActiveValue::Set(param.avatar_hash),
            admin: ActiveValue::Set(param.admin),
            created_at: ActiveValue::Set(Utc::now()),
            last_login_at: ActiveValue::Set(None),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by their local id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by email address, compared case-insensitively.
    ///
    /// Emails are stored normalized by `create`, so the lookup normalizes the input the
    /// same way.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - A user with that email exists
    /// - `Ok(None)` - No user with that email
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(normalize_email(email)))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Returns every user name starting with `prefix`.
    ///
    /// The match is done by the database with `LIKE`, so the result may contain names
    /// that only match case-insensitively; callers compare exactly.
    pub async fn names_starting_with(&self, prefix: &str) -> Result<Vec<String>, DbErr> {
        entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Name)
            .filter(entity::user::Column::Name.starts_with(prefix))
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    /// Checks if any admin users exist in the database.
    ///
    /// Used on first login to determine if the new user should be granted admin
    /// privileges.
    ///
    /// # Returns
    /// - `Ok(true)` - At least one admin user exists in the database
    /// - `Ok(false)` - No admin users exist (first-time setup scenario)
    /// - `Err(DbErr)` - Database error during count query
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Admin.eq(true))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Records a login: stamps `last_login_at` and refreshes the avatar hash.
    ///
    /// # Returns
    /// - `Ok(())` - User updated (or no matching user found)
    /// - `Err(DbErr)` - Database error during update
    pub async fn record_login(
        &self,
        user_id: i32,
        avatar_hash: Option<String>,
    ) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(user_id))
            .col_expr(
                entity::user::Column::LastLoginAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .col_expr(
                entity::user::Column::AvatarHash,
                sea_orm::sea_query::Expr::value(avatar_hash),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }
}

/// Lowercases and trims an email address for storage and lookup.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
