use axum::{
    routing::{get, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::ErrorDto,
        settings::{DiscordSettingsDto, UpdateDiscordSettingsDto},
        user::UserDto,
    },
    server::{
        controller::{
            auth::{self, callback, login, login_page, logout},
            settings::{self, get_discord_settings, update_discord_settings},
            user::{self, get_user},
        },
        service::network::CALLBACK_PATH,
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::callback,
        auth::logout,
        user::get_user,
        settings::get_discord_settings,
        settings::update_discord_settings,
    ),
    components(schemas(ErrorDto, UserDto, DiscordSettingsDto, UpdateDiscordSettingsDto)),
    tags(
        (name = "auth", description = "Discord login flow"),
        (name = "user", description = "Logged in user"),
        (name = "settings", description = "Discord settings form"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", get(get_user))
        .route("/user/login", get(login_page))
        .route("/user/login/discord", get(login))
        .route(CALLBACK_PATH, get(callback))
        .route("/user/logout", get(logout))
        .route("/api/auth/user", get(get_user))
        .route(
            "/api/admin/settings/discord",
            put(update_discord_settings).get(get_discord_settings),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}
