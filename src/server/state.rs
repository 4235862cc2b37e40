//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - Discord network holding the outbound HTTP client and callback URL
//! - The failure policy for extra profile endpoints

use sea_orm::DatabaseConnection;

use crate::server::{model::settings::ExtraDataPolicy, service::network::DiscordNetwork};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: `DatabaseConnection` is a connection pool and
/// `DiscordNetwork` wraps a `reqwest::Client`, which uses an `Arc` internally.
/// Discord credentials are not part of the state; they are read from the database on
/// every login.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Factory for Discord OAuth2 clients.
    pub network: DiscordNetwork,

    /// What to do when an extra profile endpoint cannot be fetched.
    pub extra_data_policy: ExtraDataPolicy,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        network: DiscordNetwork,
        extra_data_policy: ExtraDataPolicy,
    ) -> Self {
        Self {
            db,
            network,
            extra_data_policy,
        }
    }
}
