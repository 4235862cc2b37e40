//! Social auth factory for linking test users to Discord accounts.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Plugin id the service stores Discord links under.
pub const DISCORD_PLUGIN_ID: &str = "social_auth_discord";

/// Factory for creating links between a local user and a Discord account.
pub struct SocialAuthFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    plugin_id: String,
    provider_user_id: String,
    token: String,
    additional_data: Option<serde_json::Value>,
}

impl<'a> SocialAuthFactory<'a> {
    /// Creates a new SocialAuthFactory for the given user.
    ///
    /// Defaults:
    /// - plugin_id: `"social_auth_discord"`
    /// - provider_user_id: auto-incremented numeric string
    /// - token: `"token_{id}"`
    /// - additional_data: `None`
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            plugin_id: DISCORD_PLUGIN_ID.to_string(),
            provider_user_id: id.to_string(),
            token: format!("token_{}", id),
            additional_data: None,
        }
    }

    /// Sets the Discord user id of the link.
    pub fn provider_user_id(mut self, provider_user_id: impl Into<String>) -> Self {
        self.provider_user_id = provider_user_id.into();
        self
    }

    /// Sets the plugin id of the link.
    pub fn plugin_id(mut self, plugin_id: impl Into<String>) -> Self {
        self.plugin_id = plugin_id.into();
        self
    }

    /// Sets the stored access token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Sets the extra profile data stored with the link.
    pub fn additional_data(mut self, data: serde_json::Value) -> Self {
        self.additional_data = Some(data);
        self
    }

    /// Builds and inserts the link into the database.
    ///
    /// # Returns
    /// - `Ok(entity::social_auth::Model)` - Created link
    /// - `Err(DbErr)` - Database error during insert (e.g. user does not exist)
    pub async fn build(self) -> Result<entity::social_auth::Model, DbErr> {
        let now = Utc::now();
        entity::social_auth::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            plugin_id: ActiveValue::Set(self.plugin_id),
            provider_user_id: ActiveValue::Set(self.provider_user_id),
            token: ActiveValue::Set(self.token),
            additional_data: ActiveValue::Set(self.additional_data),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user linked to the given Discord account id.
///
/// # Returns
/// - `Ok((user, link))` - Created user and its Discord link
/// - `Err(DbErr)` - Database error during insert
pub async fn create_linked_user(
    db: &DatabaseConnection,
    provider_user_id: impl Into<String>,
) -> Result<(entity::user::Model, entity::social_auth::Model), DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let link = SocialAuthFactory::new(db, user.id)
        .provider_user_id(provider_user_id)
        .build()
        .await?;

    Ok((user, link))
}
