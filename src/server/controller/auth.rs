use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
};
use tower_sessions::Session;

use crate::{
    model::api::ErrorDto,
    server::{
        error::{auth::LoginFlowError, AppError},
        middleware::session::{AuthSession, CsrfSession, LoginFlowSession},
        model::auth::{CallbackParams, LoginParams},
        service::{
            auth::{callback::CallbackService, login::LoginService},
            authenticator::SocialAuthUserAuthenticator,
            settings::DiscordSettingsService,
        },
        state::AppState,
        util::parse::parse_destination,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Generic login page every aborted login ends up on.
pub const LOGIN_PAGE_PATH: &str = "/user/login";

/// Message shown on the login page after an aborted login.
pub const LOGIN_FAILED_MESSAGE: &str =
    "You could not be authenticated, please contact the administrator.";

#[utoipa::path(
    get,
    path = "/user/login/discord",
    tag = AUTH_TAG,
    params(LoginParams),
    responses(
        (status = 307, description = "Redirect to Discord's consent screen"),
        (status = 303, description = "Discord login is not configured, redirect to the login page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LoginParams>,
) -> Result<impl IntoResponse, AppError> {
    let (url, csrf_token) = match LoginService::new(&state.db, &state.network)
        .login_url()
        .await
    {
        Ok(login) => login,
        Err(err) => return abort_login(&session, err).await,
    };

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    if let Some(destination) = params.destination.as_deref().and_then(parse_destination) {
        LoginFlowSession::new(&session)
            .set_destination(destination)
            .await?;
    }

    Ok(Redirect::temporary(url.as_str()))
}

#[utoipa::path(
    get,
    path = "/user/login/discord/callback",
    tag = AUTH_TAG,
    params(CallbackParams),
    responses(
        (status = 303, description = "Logged in, or login aborted and redirected to the login page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let expected_state = match CsrfSession::new(&session).take_token().await {
        Ok(token) => token,
        Err(err) => return abort_login(&session, LoginFlowError::App(err)).await,
    };

    let callback_service = CallbackService::new(
        DiscordSettingsService::new(&state.db),
        &state.network,
        SocialAuthUserAuthenticator::new(&state.db, &session),
        state.extra_data_policy,
    );

    match callback_service.handle(params, expected_state).await {
        Ok(redirect) => Ok(redirect),
        Err(err) => abort_login(&session, err).await,
    }
}

/// Logs why a login was aborted and sends the user back to the login page.
///
/// The user only ever sees the generic failure message.
async fn abort_login(session: &Session, err: LoginFlowError) -> Result<Redirect, AppError> {
    match &err {
        LoginFlowError::Auth(_) => tracing::warn!("Discord login aborted: {}", err),
        LoginFlowError::Config(_) | LoginFlowError::App(_) => {
            tracing::error!("Discord login aborted: {}", err)
        }
    }

    LoginFlowSession::new(session)
        .set_login_error(LOGIN_FAILED_MESSAGE)
        .await?;

    Ok(Redirect::to(LOGIN_PAGE_PATH))
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginPageTemplate {
    notice: Option<String>,
}

/// Minimal login page linking to the Discord login and showing a pending login error.
pub async fn login_page(session: Session) -> Result<impl IntoResponse, AppError> {
    let notice = LoginFlowSession::new(&session).take_login_error().await?;

    Ok(Html(LoginPageTemplate { notice }.render()?))
}

#[utoipa::path(
    get,
    path = "/user/logout",
    tag = AUTH_TAG,
    responses(
        (status = 303, description = "Session cleared, redirect to the login page")
    ),
)]
pub async fn logout(session: Session) -> impl IntoResponse {
    AuthSession::new(&session).clear().await;

    Redirect::to(LOGIN_PAGE_PATH)
}
