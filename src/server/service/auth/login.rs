use oauth2::CsrfToken;
use sea_orm::DatabaseConnection;
use url::Url;

use crate::server::{
    error::auth::LoginFlowError,
    service::{network::DiscordNetwork, settings::DiscordSettingsService},
};

/// Starts the authorization-code flow.
pub struct LoginService<'a> {
    settings: DiscordSettingsService<'a>,
    network: &'a DiscordNetwork,
}

impl<'a> LoginService<'a> {
    pub fn new(db: &'a DatabaseConnection, network: &'a DiscordNetwork) -> Self {
        Self {
            settings: DiscordSettingsService::new(db),
            network,
        }
    }

    /// Generates a Discord OAuth2 login URL with CSRF protection.
    ///
    /// Requests `identify` and `email` plus the scopes configured in the settings. Returns
    /// both the URL and the CSRF token the callback must be validated against.
    ///
    /// # Returns
    /// - `Ok((Url, CsrfToken))` - Authorization URL and its CSRF state token
    /// - `Err(LoginFlowError::Config)` - Stored credentials are missing or an URL is invalid
    /// - `Err(LoginFlowError::App)` - Settings could not be loaded
    pub async fn login_url(&self) -> Result<(Url, CsrfToken), LoginFlowError> {
        let settings = self.settings.provider_settings().await?;
        let client = self.network.build_client(&settings)?;

        Ok(client.authorize_url(&settings.scopes))
    }
}
