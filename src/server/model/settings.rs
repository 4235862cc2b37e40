//! Discord provider settings.
//!
//! Settings are stored the way the admin form submits them (`StoredDiscordSettings`,
//! opaque strings) and parsed into `ProviderSettings` whenever a client is needed.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    model::settings::{DiscordSettingsDto, UpdateDiscordSettingsDto},
    server::{
        error::{config::ConfigError, AppError},
        util::parse::{parse_endpoints, parse_scopes},
    },
};

/// Plugin id the Discord network stores its account links under.
pub const DISCORD_PLUGIN_ID: &str = "social_auth_discord";

/// Configuration object name of the Discord settings.
pub const DISCORD_SETTINGS_NAME: &str = "social_auth_discord.settings";

/// Scopes requested on every login regardless of configuration.
pub const REQUIRED_SCOPES: [&str; 2] = ["identify", "email"];

/// Endpoint called after a first login to collect additional profile data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraEndpoint {
    /// API path relative to the Discord API base, e.g. `/users/@me/guilds`.
    pub path: String,
    /// Key the response is stored under.
    pub name: String,
}

/// Parsed Discord settings used to build an OAuth2 client.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub client_id: String,
    pub client_secret: String,
    /// Effective scopes, always starting with `identify` and `email`.
    pub scopes: Vec<String>,
    pub endpoints: Vec<ExtraEndpoint>,
}

impl ProviderSettings {
    /// Parses stored settings into their usable form.
    pub fn from_stored(stored: &StoredDiscordSettings) -> Self {
        Self {
            client_id: stored.client_id.trim().to_string(),
            client_secret: stored.client_secret.trim().to_string(),
            scopes: parse_scopes(&stored.scopes),
            endpoints: parse_endpoints(&stored.endpoints),
        }
    }

    /// Whether both client credentials are present.
    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("scopes", &self.scopes)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

/// Discord settings as persisted under `social_auth_discord.settings`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredDiscordSettings {
    pub client_id: String,
    pub client_secret: String,
    /// Comma separated additional scopes.
    pub scopes: String,
    /// Newline separated `path|name` pairs.
    pub endpoints: String,
}

impl StoredDiscordSettings {
    /// Validates a settings form submission.
    ///
    /// Trims the client credentials and rejects either being empty. Scopes and endpoints
    /// are kept verbatim.
    ///
    /// # Returns
    /// - `Ok(StoredDiscordSettings)` - Settings ready to persist
    /// - `Err(AppError::BadRequest)` - Client ID or Client Secret is blank
    pub fn from_dto(dto: UpdateDiscordSettingsDto) -> Result<Self, AppError> {
        let client_id = dto.client_id.trim().to_string();
        let client_secret = dto.client_secret.trim().to_string();

        if client_id.is_empty() {
            return Err(AppError::BadRequest("Client ID is required".to_string()));
        }
        if client_secret.is_empty() {
            return Err(AppError::BadRequest("Client Secret is required".to_string()));
        }

        Ok(Self {
            client_id,
            client_secret,
            scopes: dto.scopes,
            endpoints: dto.endpoints,
        })
    }

    /// Converts stored settings into the settings form DTO.
    ///
    /// # Arguments
    /// - `authorized_redirect_url` - Absolute callback URL to register at Discord
    pub fn into_dto(self, authorized_redirect_url: String) -> DiscordSettingsDto {
        DiscordSettingsDto {
            client_id: self.client_id,
            client_secret: self.client_secret,
            scopes: self.scopes,
            endpoints: self.endpoints,
            authorized_redirect_url,
        }
    }
}

impl fmt::Debug for StoredDiscordSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredDiscordSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("scopes", &self.scopes)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

/// What to do when an extra endpoint cannot be fetched.
///
/// Neither policy aborts the login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtraDataPolicy {
    /// Log the failure and leave the endpoint out of the extra data.
    #[default]
    Omit,
    /// Log the failure and store `{"error": "..."}` under the endpoint name.
    Record,
}

impl FromStr for ExtraDataPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "omit" => Ok(Self::Omit),
            "record" => Ok(Self::Record),
            other => Err(ConfigError::InvalidEnvVar {
                name: "EXTRA_DATA_FAILURE_POLICY".to_string(),
                reason: format!("expected 'omit' or 'record', got '{}'", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(client_id: &str, client_secret: &str) -> UpdateDiscordSettingsDto {
        UpdateDiscordSettingsDto {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            scopes: "guilds, connections".to_string(),
            endpoints: "/users/@me/guilds|user_guilds".to_string(),
        }
    }

    #[test]
    fn form_submission_trims_credentials() {
        let stored = StoredDiscordSettings::from_dto(form("  1234  ", "\tsecret\n")).unwrap();

        assert_eq!(stored.client_id, "1234");
        assert_eq!(stored.client_secret, "secret");
        assert_eq!(stored.scopes, "guilds, connections");
        assert_eq!(stored.endpoints, "/users/@me/guilds|user_guilds");
    }

    #[test]
    fn form_submission_rejects_blank_client_id() {
        let result = StoredDiscordSettings::from_dto(form("   ", "secret"));

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn form_submission_rejects_blank_client_secret() {
        let result = StoredDiscordSettings::from_dto(form("1234", ""));

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn provider_settings_always_request_identify_and_email() {
        let stored = StoredDiscordSettings {
            client_id: "1234".to_string(),
            client_secret: "secret".to_string(),
            scopes: "guilds,email".to_string(),
            endpoints: String::new(),
        };

        let settings = ProviderSettings::from_stored(&stored);

        assert_eq!(settings.scopes, vec!["identify", "email", "guilds"]);
        assert!(settings.endpoints.is_empty());
        assert!(settings.has_credentials());
    }

    #[test]
    fn provider_settings_without_secret_have_no_credentials() {
        let stored = StoredDiscordSettings {
            client_id: "1234".to_string(),
            ..Default::default()
        };

        assert!(!ProviderSettings::from_stored(&stored).has_credentials());
    }

    #[test]
    fn debug_output_redacts_secret() {
        let stored = StoredDiscordSettings {
            client_id: "1234".to_string(),
            client_secret: "hunter2".to_string(),
            ..Default::default()
        };

        assert!(!format!("{:?}", stored).contains("hunter2"));
        assert!(!format!("{:?}", ProviderSettings::from_stored(&stored)).contains("hunter2"));
    }

    #[test]
    fn parses_extra_data_policy() {
        assert_eq!("omit".parse::<ExtraDataPolicy>().unwrap(), ExtraDataPolicy::Omit);
        assert_eq!(" Record ".parse::<ExtraDataPolicy>().unwrap(), ExtraDataPolicy::Record);
        assert!("abort".parse::<ExtraDataPolicy>().is_err());
    }
}
