//! Query parameters of the browser-facing login routes.

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters Discord appends when redirecting back to the callback route.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// Authorization code to exchange for an access token.
    pub code: Option<String>,
    /// CSRF state token to be validated against the session value.
    pub state: Option<String>,
    /// OAuth2 error code, present when the user denied consent or the request was invalid.
    pub error: Option<String>,
    /// Human readable description of `error`.
    pub error_description: Option<String>,
}

/// Query parameters accepted when starting a Discord login.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginParams {
    /// Local path to return to after a successful login.
    pub destination: Option<String>,
}
