use axum::Json;
use test_utils::factory::config::create_discord_settings;

use super::*;
use crate::{
    model::settings::UpdateDiscordSettingsDto,
    server::{
        controller::settings::{get_discord_settings, update_discord_settings},
        service::settings::DiscordSettingsService,
    },
};

async fn login_admin(db: &DatabaseConnection, session: &tower_sessions::Session, admin: bool) {
    let user = factory::user::UserFactory::new(db)
        .admin(admin)
        .build()
        .await
        .unwrap();
    AuthSession::new(session).set_user_id(user.id).await.unwrap();
}

fn form(client_id: &str, client_secret: &str) -> UpdateDiscordSettingsDto {
    UpdateDiscordSettingsDto {
        client_id: client_id.to_string(),
        client_secret: client_secret.to_string(),
        scopes: "guilds".to_string(),
        endpoints: "/users/@me/guilds|user_guilds".to_string(),
    }
}

/// Tests admins see the stored settings and the redirect URL to register.
#[tokio::test]
async fn admin_reads_settings_with_redirect_url() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    create_discord_settings(db, "1234", "secret", "guilds", "").await?;
    login_admin(db, session, true).await;
    let server = MockServer::start().await;

    let response = get_discord_settings(State(app_state(db, &server)), session.clone())
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["client_id"], "1234");
    assert_eq!(body["scopes"], "guilds");
    assert_eq!(body["authorized_redirect_url"], REDIRECT_URL);

    Ok(())
}

#[tokio::test]
async fn non_admin_cannot_read_settings() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    login_admin(db, session, false).await;
    let server = MockServer::start().await;

    let response = get_discord_settings(State(app_state(db, &server)), session.clone())
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn anonymous_cannot_update_settings() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let server = MockServer::start().await;

    let response = update_discord_settings(
        State(app_state(db, &server)),
        session.clone(),
        Json(form("1234", "secret")),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Tests the settings form trims credentials before saving.
#[tokio::test]
async fn update_trims_and_saves_settings() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    login_admin(db, session, true).await;
    let server = MockServer::start().await;

    let response = update_discord_settings(
        State(app_state(db, &server)),
        session.clone(),
        Json(form("  1234 ", " secret\n")),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);

    let stored = DiscordSettingsService::new(db).get_stored().await?;
    assert_eq!(stored.client_id, "1234");
    assert_eq!(stored.client_secret, "secret");
    assert_eq!(stored.endpoints, "/users/@me/guilds|user_guilds");

    Ok(())
}

/// Tests a blank client secret is rejected and nothing is stored.
///
/// Expected: 400 Bad Request
#[tokio::test]
async fn update_rejects_blank_secret() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    create_discord_settings(db, "1234", "secret", "", "").await?;
    login_admin(db, session, true).await;
    let server = MockServer::start().await;

    let response = update_discord_settings(
        State(app_state(db, &server)),
        session.clone(),
        Json(form("5678", "   ")),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let stored = DiscordSettingsService::new(db).get_stored().await?;
    assert_eq!(stored.client_id, "1234");

    Ok(())
}
