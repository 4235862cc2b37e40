//! HTTP request handlers.
//!
//! Controllers check access, convert between DTOs and domain models and delegate to the
//! service layer. The browser-facing login routes answer with redirects; every other
//! route answers with JSON.

pub mod auth;
pub mod settings;
pub mod user;

#[cfg(test)]
mod test;
