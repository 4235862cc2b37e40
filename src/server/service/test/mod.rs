use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Redirect;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::server::{
    error::AppError,
    model::profile::AuthenticatedIdentity,
    service::{
        authenticator::Authenticator,
        network::{DiscordEndpoints, DiscordNetwork},
    },
};


const ACCESS_TOKEN: &str = "discord-access-token";
const REDIRECT_URL: &str = "http://localhost:8080/user/login/discord/callback";
const DISCORD_USER_ID: &str = "80351110224678912";

/// Network whose Discord endpoints all point at `server`.
fn network_for(server: &MockServer) -> DiscordNetwork {
    let http_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap();

    DiscordNetwork::new(
        http_client,
        DiscordEndpoints {
            authorize_url: format!("{}/oauth2/authorize", server.uri()),
            token_url: format!("{}/api/oauth2/token", server.uri()),
            api_url: format!("{}/api/v10", server.uri()),
        },
        REDIRECT_URL.to_string(),
    )
}

fn token_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 604800,
        "refresh_token": "discord-refresh-token",
        "scope": "identify email"
    }))
}

fn profile_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": DISCORD_USER_ID,
        "username": "Nelly",
        "global_name": "Nelly",
        "email": "nelly@discord.com",
        "avatar": "8342729096ea3675442027381ff50dfe",
        "verified": true
    }))
}

/// Mounts a token endpoint that must be called `calls` times.
async fn mount_token(server: &MockServer, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/oauth2/token"))
        .respond_with(token_response())
        .expect(calls)
        .mount(server)
        .await;
}

/// Mounts a profile endpoint that must be called `calls` times.
async fn mount_profile(server: &MockServer, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/v10/users/@me"))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .respond_with(profile_response())
        .expect(calls)
        .mount(server)
        .await;
}

/// Authenticator recording every identity it is handed.
#[derive(Clone, Default)]
struct RecordingAuthenticator {
    linked: bool,
    identities: Arc<Mutex<Vec<AuthenticatedIdentity>>>,
}

impl RecordingAuthenticator {
    fn linked() -> Self {
        Self {
            linked: true,
            ..Default::default()
        }
    }

    fn identities(&self) -> Vec<AuthenticatedIdentity> {
        self.identities.lock().unwrap().clone()
    }
}

#[async_trait]
impl Authenticator for RecordingAuthenticator {
    async fn check_provider_is_associated(&self, _provider_user_id: &str) -> Result<bool, AppError> {
        Ok(self.linked)
    }

    async fn authenticate_user(&self, identity: AuthenticatedIdentity) -> Result<Redirect, AppError> {
        self.identities.lock().unwrap().push(identity);
        Ok(Redirect::to("/user"))
    }
}
