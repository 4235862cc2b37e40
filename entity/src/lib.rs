//! SeaORM entities for the Discord social login service.

pub mod prelude;

pub mod config;
pub mod social_auth;
pub mod user;
