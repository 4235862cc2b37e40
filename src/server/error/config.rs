use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value cannot be used.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Discord client id or secret is empty in the stored settings.
    ///
    /// Detected when building the OAuth2 client. Surfaced to administrators through the
    /// application log, never to end users.
    #[error("Define Client ID and Client Secret on module settings.")]
    MissingClientCredentials,

    /// One of the OAuth2 endpoint or redirect URLs could not be parsed.
    #[error("Invalid {name} URL '{value}': {source}")]
    InvalidUrl {
        /// Which URL failed (authorization, token, redirect)
        name: &'static str,
        /// The rejected value
        value: String,
        /// The underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// The outbound HTTP client could not be built, usually because of a bad proxy URL.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
