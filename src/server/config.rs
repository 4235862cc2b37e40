use url::Url;

use crate::server::{error::config::ConfigError, model::settings::ExtraDataPolicy};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_API_URL: &str = "https://discord.com/api/v10";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    /// Public base URL of the application, used to build the OAuth2 callback URL.
    pub app_url: String,
    pub bind_address: String,
    /// Proxy all outbound Discord requests go through.
    pub http_proxy: Option<String>,

    /// Seed credentials stored when no Discord settings exist yet.
    pub discord_client_id: Option<String>,
    pub discord_client_secret: Option<String>,

    pub discord_auth_url: String,
    pub discord_token_url: String,
    pub discord_api_url: String,

    pub extra_data_policy: ExtraDataPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` or `APP_URL` is missing
    /// - `Err(ConfigError::InvalidEnvVar)` - `APP_URL`, `HTTP_PROXY_URL` or
    ///   `EXTRA_DATA_FAILURE_POLICY` has an unusable value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required =
            |name: &str| var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let app_url = required("APP_URL")?;
        parse_absolute_url("APP_URL", &app_url)?;

        let http_proxy = var("HTTP_PROXY_URL");
        if let Some(proxy) = &http_proxy {
            parse_absolute_url("HTTP_PROXY_URL", proxy)?;
        }

        let extra_data_policy = match var("EXTRA_DATA_FAILURE_POLICY") {
            Some(value) => value.parse()?,
            None => ExtraDataPolicy::default(),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            app_url: app_url.trim_end_matches('/').to_string(),
            bind_address: var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            http_proxy,
            discord_client_id: var("DISCORD_CLIENT_ID"),
            discord_client_secret: var("DISCORD_CLIENT_SECRET"),
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            discord_api_url: DISCORD_API_URL.to_string(),
            extra_data_policy,
        })
    }
}

fn parse_absolute_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: format!("'{}' is not an absolute URL", value),
        });
    }

    Ok(url)
}
