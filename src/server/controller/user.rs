use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{error::AppError, middleware::auth::AuthGuard, state::AppState},
};

pub static USER_TAG: &str = "user";

/// Returns the logged in user.
///
/// Also serves `GET /user`, the default landing page after a successful login.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = USER_TAG,
    responses(
        (status = 200, description = "The logged in user", body = UserDto),
        (status = 401, description = "Nobody is logged in", body = ErrorDto),
        (status = 404, description = "The session references a deleted user", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
