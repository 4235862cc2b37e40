//! Data transfer objects exchanged over the JSON API.

pub mod api;
pub mod settings;
pub mod user;
