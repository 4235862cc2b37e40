//! Links between local users and provider accounts.

/// A local user's link to a provider account.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialAuthLink {
    pub id: i32,
    pub user_id: i32,
    pub plugin_id: String,
    pub provider_user_id: String,
    pub additional_data: Option<serde_json::Value>,
}

impl SocialAuthLink {
    pub fn from_entity(entity: entity::social_auth::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            plugin_id: entity.plugin_id,
            provider_user_id: entity.provider_user_id,
            additional_data: entity.additional_data,
        }
    }
}

/// Parameters for linking a user to a provider account.
#[derive(Debug, Clone)]
pub struct CreateSocialAuthParam {
    pub user_id: i32,
    pub plugin_id: String,
    pub provider_user_id: String,
    pub token: String,
    pub additional_data: Option<serde_json::Value>,
}
