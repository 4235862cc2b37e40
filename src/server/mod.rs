//! Server-side API backend and business logic.
//!
//! This module contains the complete backend of the Discord login service: the OAuth2
//! login flow, the admin settings API, data access and infrastructure services. The
//! backend uses Axum as the web framework, SeaORM for database operations, and the
//! `oauth2` crate over `reqwest` to talk to Discord.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Login flow orchestration, Discord client and settings
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Typed session access and authentication guards
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, Discord network)
//! - **Startup** (`startup`) - Initialization of database, sessions, and Discord settings
//! - **Router** (`router`) - Axum route configuration and API documentation
//!
//! # Login Flow
//!
//! 1. `GET /user/login/discord` stores a CSRF token and redirects to Discord
//! 2. Discord redirects back to `GET /user/login/discord/callback`
//! 3. The callback service exchanges the code, fetches the profile and, for accounts not
//!    linked yet, the configured extra endpoints
//! 4. The authenticator links or creates the local user and logs them in
//! 5. Any failure on the way ends on `GET /user/login` with a generic message

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
