use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        settings::{DiscordSettingsDto, UpdateDiscordSettingsDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::settings::StoredDiscordSettings,
        service::settings::DiscordSettingsService,
        state::AppState,
    },
};

pub static SETTINGS_TAG: &str = "settings";

#[utoipa::path(
    get,
    path = "/api/admin/settings/discord",
    tag = SETTINGS_TAG,
    responses(
        (status = 200, description = "Current Discord settings", body = DiscordSettingsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_discord_settings(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let settings = DiscordSettingsService::new(&state.db).get_stored().await?;

    Ok((
        StatusCode::OK,
        Json(settings.into_dto(state.network.redirect_url().to_string())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/settings/discord",
    tag = SETTINGS_TAG,
    request_body = UpdateDiscordSettingsDto,
    responses(
        (status = 200, description = "Successfully updated Discord settings", body = DiscordSettingsDto),
        (status = 400, description = "Client ID or Client Secret is blank", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_discord_settings(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateDiscordSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let settings = DiscordSettingsService::new(&state.db)
        .save(StoredDiscordSettings::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::OK,
        Json(settings.into_dto(state.network.redirect_url().to_string())),
    ))
}
