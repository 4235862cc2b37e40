//! Config factory for storing configuration objects.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Configuration name of the Discord provider settings.
pub const DISCORD_SETTINGS: &str = "social_auth_discord.settings";

/// Stores a raw configuration object under `name`.
///
/// # Returns
/// - `Ok(entity::config::Model)` - Created configuration row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_config(
    db: &DatabaseConnection,
    name: impl Into<String>,
    data: serde_json::Value,
) -> Result<entity::config::Model, DbErr> {
    entity::config::ActiveModel {
        name: ActiveValue::Set(name.into()),
        data: ActiveValue::Set(data),
    }
    .insert(db)
    .await
}

/// Stores Discord provider settings in the format the settings form saves them.
pub async fn create_discord_settings(
    db: &DatabaseConnection,
    client_id: &str,
    client_secret: &str,
    scopes: &str,
    endpoints: &str,
) -> Result<entity::config::Model, DbErr> {
    create_config(
        db,
        DISCORD_SETTINGS,
        serde_json::json!({
            "client_id": client_id,
            "client_secret": client_secret,
            "scopes": scopes,
            "endpoints": endpoints,
        }),
    )
    .await
}
