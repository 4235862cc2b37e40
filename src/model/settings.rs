use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Discord client settings as shown on the admin settings form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct DiscordSettingsDto {
    pub client_id: String,
    pub client_secret: String,
    /// Additional scopes, comma separated. `identify` and `email` are always requested.
    pub scopes: String,
    /// Endpoints called on first login, one `path|name` pair per line.
    pub endpoints: String,
    /// Read-only value to copy into the Discord application's redirect URIs.
    pub authorized_redirect_url: String,
}

/// Payload submitted by the admin settings form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UpdateDiscordSettingsDto {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: String,
    #[serde(default)]
    pub endpoints: String,
}
