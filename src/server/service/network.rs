//! Discord provider adapter.
//!
//! `DiscordNetwork` is built once at startup and holds what never changes between
//! requests: the outbound HTTP client, Discord's endpoint URLs and the absolute callback
//! URL. Client credentials live in the database and may change at any time, so a
//! `DiscordClient` is built from fresh settings for every login attempt.

use oauth2::{
    basic::{BasicClient, BasicErrorResponseType, BasicTokenType},
    AuthUrl, AuthorizationCode, Client, ClientId, ClientSecret, CsrfToken, EmptyExtraTokenFields,
    EndpointNotSet, EndpointSet, RedirectUrl, RequestTokenError, RevocationErrorResponseType,
    Scope, StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse, TokenResponse, TokenUrl,
};
use url::Url;

use crate::server::{
    config::Config,
    error::{auth::AuthError, config::ConfigError},
    model::{
        profile::{AuthorizedProfile, DiscordUser, ExtraProfileData},
        settings::{ExtraDataPolicy, ExtraEndpoint, ProviderSettings},
    },
};

/// Route Discord redirects back to after the user approved or denied the login.
pub const CALLBACK_PATH: &str = "/user/login/discord/callback";

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Discord's OAuth2 and REST API locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordEndpoints {
    pub authorize_url: String,
    pub token_url: String,
    /// REST API base, without trailing slash.
    pub api_url: String,
}

impl DiscordEndpoints {
    pub fn from_config(config: &Config) -> Self {
        Self {
            authorize_url: config.discord_auth_url.clone(),
            token_url: config.discord_token_url.clone(),
            api_url: config.discord_api_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Factory for Discord OAuth2 clients.
#[derive(Debug, Clone)]
pub struct DiscordNetwork {
    http_client: reqwest::Client,
    endpoints: DiscordEndpoints,
    redirect_url: String,
}

impl DiscordNetwork {
    pub fn new(
        http_client: reqwest::Client,
        endpoints: DiscordEndpoints,
        redirect_url: String,
    ) -> Self {
        Self {
            http_client,
            endpoints,
            redirect_url,
        }
    }

    /// Builds the network from application configuration.
    ///
    /// The HTTP client does not follow redirects, which keeps token and API requests from
    /// being bounced to other hosts. When a proxy is configured every request goes through
    /// it; otherwise proxy environment variables are ignored.
    ///
    /// # Returns
    /// - `Ok(DiscordNetwork)` - Network ready to build clients
    /// - `Err(ConfigError::HttpClient)` - Proxy URL invalid or TLS backend unavailable
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        let builder = match &config.http_proxy {
            Some(proxy_url) => {
                builder.proxy(reqwest::Proxy::all(proxy_url).map_err(ConfigError::HttpClient)?)
            }
            None => builder.no_proxy(),
        };
        let http_client = builder.build().map_err(ConfigError::HttpClient)?;

        let redirect_url = format!("{}{}", config.app_url.trim_end_matches('/'), CALLBACK_PATH);

        Ok(Self::new(
            http_client,
            DiscordEndpoints::from_config(config),
            redirect_url,
        ))
    }

    /// Absolute callback URL to register in the Discord application.
    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    /// Builds an OAuth2 client from the given settings.
    ///
    /// No network call is made.
    ///
    /// # Returns
    /// - `Ok(DiscordClient)` - Client ready for the authorization-code flow
    /// - `Err(ConfigError::MissingClientCredentials)` - Client ID or Client Secret is empty
    /// - `Err(ConfigError::InvalidUrl)` - An endpoint or the redirect URL is malformed
    pub fn build_client(&self, settings: &ProviderSettings) -> Result<DiscordClient, ConfigError> {
        if !settings.has_credentials() {
            let err = ConfigError::MissingClientCredentials;
            tracing::error!("{}", err);
            return Err(err);
        }

        let auth_url = AuthUrl::new(self.endpoints.authorize_url.clone()).map_err(|source| {
            ConfigError::InvalidUrl {
                name: "authorization",
                value: self.endpoints.authorize_url.clone(),
                source,
            }
        })?;
        let token_url = TokenUrl::new(self.endpoints.token_url.clone()).map_err(|source| {
            ConfigError::InvalidUrl {
                name: "token",
                value: self.endpoints.token_url.clone(),
                source,
            }
        })?;
        let redirect_url = RedirectUrl::new(self.redirect_url.clone()).map_err(|source| {
            ConfigError::InvalidUrl {
                name: "redirect",
                value: self.redirect_url.clone(),
                source,
            }
        })?;

        let oauth_client = BasicClient::new(ClientId::new(settings.client_id.clone()))
            .set_client_secret(ClientSecret::new(settings.client_secret.clone()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(redirect_url);

        Ok(DiscordClient {
            oauth_client,
            http_client: self.http_client.clone(),
            api_url: self.endpoints.api_url.clone(),
        })
    }
}

/// OAuth2 client bound to one set of Discord credentials.
pub struct DiscordClient {
    oauth_client: OAuth2Client,
    http_client: reqwest::Client,
    api_url: String,
}

impl DiscordClient {
    /// Builds the authorization URL the user is sent to, with a fresh CSRF state token.
    pub fn authorize_url(&self, scopes: &[String]) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(scopes.iter().cloned().map(Scope::new))
            .url()
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// # Returns
    /// - `Ok(String)` - The access token
    /// - `Err(AuthError::TokenExchange)` - Request failed or Discord rejected the code
    pub async fn exchange_code(&self, code: String) -> Result<String, AuthError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(&self.http_client)
            .await
            .map_err(|err| match err {
                RequestTokenError::ServerResponse(response) => {
                    AuthError::TokenExchange(response.to_string())
                }
                other => AuthError::TokenExchange(other.to_string()),
            })?;

        Ok(token.access_token().secret().clone())
    }

    /// Retrieves the authenticated user's profile from `GET /users/@me`.
    ///
    /// # Returns
    /// - `Ok(AuthorizedProfile)` - Profile with a non-empty id and username
    /// - `Err(AuthError::ProfileFetch)` - Request failed or returned a non-success status
    /// - `Err(AuthError::InvalidProfile)` - Response lacks the user id or username
    pub async fn fetch_profile(&self, access_token: &str) -> Result<AuthorizedProfile, AuthError> {
        let user = self
            .http_client
            .get(format!("{}/users/@me", self.api_url))
            .bearer_auth(access_token)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AuthError::ProfileFetch(e.to_string()))?
            .json::<DiscordUser>()
            .await
            .map_err(|e| AuthError::ProfileFetch(e.to_string()))?;

        AuthorizedProfile::try_from(user)
    }

    /// Calls every extra endpoint once and collects the responses by endpoint name.
    ///
    /// Failures never abort the login; `policy` decides whether a failed endpoint is left
    /// out or recorded as `{"error": "..."}`.
    ///
    /// # Returns
    /// - `None` - No endpoints are configured
    /// - `Some(ExtraProfileData)` - One entry per successful (or recorded) endpoint
    pub async fn fetch_extra_details(
        &self,
        access_token: &str,
        endpoints: &[ExtraEndpoint],
        policy: ExtraDataPolicy,
    ) -> Option<ExtraProfileData> {
        if endpoints.is_empty() {
            return None;
        }

        let mut data = ExtraProfileData::new();
        for endpoint in endpoints {
            match self.fetch_endpoint(access_token, &endpoint.path).await {
                Ok(value) => {
                    data.insert(endpoint.name.clone(), value);
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to fetch Discord endpoint {} ({}): {}",
                        endpoint.path,
                        endpoint.name,
                        e
                    );

                    if policy == ExtraDataPolicy::Record {
                        data.insert(
                            endpoint.name.clone(),
                            serde_json::json!({ "error": e.to_string() }),
                        );
                    }
                }
            }
        }

        Some(data)
    }

    async fn fetch_endpoint(
        &self,
        access_token: &str,
        path: &str,
    ) -> Result<serde_json::Value, reqwest::Error> {
        self.http_client
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await
    }
}
