//! Discord settings persistence and validation.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::config::ConfigRepository,
    error::{config::ConfigError, AppError},
    model::settings::{ProviderSettings, StoredDiscordSettings, DISCORD_SETTINGS_NAME},
};

/// Service reading and writing the `social_auth_discord.settings` configuration object.
pub struct DiscordSettingsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DiscordSettingsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the stored settings, falling back to empty settings when nothing is stored.
    pub async fn get_stored(&self) -> Result<StoredDiscordSettings, AppError> {
        let stored = ConfigRepository::new(self.db)
            .get::<StoredDiscordSettings>(DISCORD_SETTINGS_NAME)
            .await?;

        Ok(stored.unwrap_or_default())
    }

    /// Loads the stored settings and parses them for use by the OAuth2 client.
    pub async fn provider_settings(&self) -> Result<ProviderSettings, AppError> {
        let stored = self.get_stored().await?;

        Ok(ProviderSettings::from_stored(&stored))
    }

    /// Replaces the stored settings.
    pub async fn save(
        &self,
        settings: StoredDiscordSettings,
    ) -> Result<StoredDiscordSettings, AppError> {
        ConfigRepository::new(self.db)
            .set(DISCORD_SETTINGS_NAME, &settings)
            .await?;

        tracing::info!("Discord settings updated");

        Ok(settings)
    }

    /// Seeds the settings from environment provided credentials.
    ///
    /// Only applies when no settings are stored yet and both credentials are non-blank,
    /// so values saved through the settings form always win over the environment.
    ///
    /// # Returns
    /// - `Ok(true)` - Settings were seeded
    /// - `Ok(false)` - Settings already existed or no credentials were provided
    pub async fn seed(
        &self,
        client_id: Option<&str>,
        client_secret: Option<&str>,
    ) -> Result<bool, AppError> {
        let repo = ConfigRepository::new(self.db);
        if repo.exists(DISCORD_SETTINGS_NAME).await? {
            return Ok(false);
        }

        let (Some(client_id), Some(client_secret)) = (client_id, client_secret) else {
            return Ok(false);
        };
        let (client_id, client_secret) = (client_id.trim(), client_secret.trim());
        if client_id.is_empty() || client_secret.is_empty() {
            return Ok(false);
        }

        repo.set(
            DISCORD_SETTINGS_NAME,
            &StoredDiscordSettings {
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
                ..Default::default()
            },
        )
        .await?;

        tracing::info!("Seeded Discord settings from environment");

        Ok(true)
    }

    /// Fails when the stored settings cannot be used to build a client.
    pub async fn validate(&self) -> Result<ProviderSettings, AppError> {
        let settings = self.provider_settings().await?;
        if !settings.has_credentials() {
            return Err(ConfigError::MissingClientCredentials.into());
        }

        Ok(settings)
    }
}
