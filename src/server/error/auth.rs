use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{config::ConfigError, AppError},
};

#[derive(Error, Debug)]
pub enum AuthError {
    /// Discord redirected back with an `error` parameter.
    ///
    /// Typically the user denied consent (`access_denied`) or the requested scopes were
    /// rejected. No token exchange is attempted.
    #[error("Discord returned an authentication error: {error} ({})", .description.as_deref().unwrap_or("no description"))]
    ProviderDenied {
        /// OAuth2 error code
        error: String,
        /// Optional human readable description supplied by Discord
        description: Option<String>,
    },

    /// CSRF state validation failed during OAuth callback.
    ///
    /// The state in the callback URL does not match the token stored in the session,
    /// indicating a potential CSRF attack, an expired session or a replayed callback.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Callback request carried neither an error nor an authorization code.
    #[error("Callback request is missing the authorization code")]
    MissingCode,

    /// Exchanging the authorization code for an access token failed.
    ///
    /// Covers network failures, invalid or already used codes and malformed responses.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),

    /// Fetching the resource owner profile failed.
    #[error("Failed to fetch Discord profile: {0}")]
    ProfileFetch(String),

    /// The profile returned by Discord lacks required fields.
    #[error("Discord returned an unusable profile: {0}")]
    InvalidProfile(String),

    /// No user is logged in for this session.
    #[error("No user in session")]
    UserNotInSession,

    /// The user referenced by the session or a Discord link no longer exists.
    #[error("User {0} not found in database")]
    UserNotInDatabase(i32),

    /// User lacks the permission required for the requested operation.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
///
/// # Returns
/// - 400 Bad Request - For failures of the login flow itself
/// - 401 Unauthorized - For requests without a logged in user
/// - 403 Forbidden - For users lacking a permission
/// - 404 Not Found - For sessions referencing a deleted user
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession => (StatusCode::UNAUTHORIZED, "Not logged in"),
            Self::UserNotInDatabase(_) => (StatusCode::NOT_FOUND, "User not found"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Access denied"),
            Self::ProviderDenied { .. }
            | Self::CsrfValidationFailed
            | Self::MissingCode
            | Self::TokenExchange(_)
            | Self::ProfileFetch(_)
            | Self::InvalidProfile(_) => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Reason a browser-facing login flow was aborted.
///
/// Every variant degrades to the same redirect to the login page; the variant only
/// decides what gets written to the log.
#[derive(Error, Debug)]
pub enum LoginFlowError {
    /// Discord client settings are unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The provider, the callback request or the exchange failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Loading settings or provisioning the user failed.
    #[error(transparent)]
    App(#[from] AppError),
}
