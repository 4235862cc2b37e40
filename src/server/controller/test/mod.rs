use axum::{
    body::to_bytes,
    extract::{Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::server::{
    error::AppError,
    middleware::session::{AuthSession, CsrfSession, LoginFlowSession},
    model::settings::ExtraDataPolicy,
    service::network::{DiscordEndpoints, DiscordNetwork},
    state::AppState,
};

mod settings;

const REDIRECT_URL: &str = "http://localhost:8080/user/login/discord/callback";

/// Application state whose Discord endpoints all point at `server`.
fn app_state(db: &DatabaseConnection, server: &MockServer) -> AppState {
    let http_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap();
    let network = DiscordNetwork::new(
        http_client,
        DiscordEndpoints {
            authorize_url: format!("{}/oauth2/authorize", server.uri()),
            token_url: format!("{}/api/oauth2/token", server.uri()),
            api_url: format!("{}/api/v10", server.uri()),
        },
        REDIRECT_URL.to_string(),
    );

    AppState::new(db.clone(), network, ExtraDataPolicy::Omit)
}

fn location(response: &Response) -> &str {
    response.headers()[LOCATION].to_str().unwrap()
}

async fn json_body(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
