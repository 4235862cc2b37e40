//! OAuth2 login with Discord
//!
//! The flow has two legs: `LoginService` sends the user to Discord's consent screen, and
//! `CallbackService` handles the redirect back, turning an authorization code into a
//! logged in session through an `Authenticator`.

pub mod callback;
pub mod login;
