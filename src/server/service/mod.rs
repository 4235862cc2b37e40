//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing the login flow and settings validation
//! - **Orchestration**: Coordinating repository calls and requests to Discord
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod auth;
pub mod authenticator;
pub mod network;
pub mod settings;

#[cfg(test)]
mod test;
