//! Type-safe session management wrappers.
//!
//! This module provides type-safe interfaces for managing different aspects of user sessions,
//! organized by concern. Each struct handles a specific domain of session data, preventing
//! typos, ensuring type consistency, and centralizing session-related logic.
//!
//! # Architecture
//!
//! Session management is split into focused concerns:
//! - `AuthSession` - User authentication state (local user ID)
//! - `CsrfSession` - CSRF token management for the Discord login flow
//! - `LoginFlowSession` - State carried across the redirect to Discord and back (post-login
//!   destination, one-shot login error message)
//!
//! Each struct wraps the same underlying `Session` but exposes only the methods
//! relevant to its concern.

use tower_sessions::Session;

use crate::server::error::AppError;

const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";
const SESSION_LOGIN_DESTINATION: &str = "login:destination";
const SESSION_LOGIN_ERROR: &str = "login:error";

/// Authentication session management.
///
/// Handles user authentication state including storing and retrieving the
/// authenticated user's local ID and session lifecycle operations.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Starts an authenticated session for `user_id`.
    ///
    /// Cycles the session id first so a session id observed before login cannot be
    /// reused afterwards. Data already in the session, such as the login destination,
    /// is preserved.
    ///
    /// # Returns
    /// - `Ok(())` - User ID successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to cycle or store in session
    pub async fn login(&self, user_id: i32) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.set_user_id(user_id).await
    }

    /// Stores the local user ID in the session.
    ///
    /// # Returns
    /// - `Ok(())` - User ID successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_user_id(&self, user_id: i32) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_USER_ID, user_id).await?;
        Ok(())
    }

    /// Retrieves the local user ID from the session.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - User is logged in
    /// - `Ok(None)` - No user in session (not logged in)
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_user_id(&self) -> Result<Option<i32>, AppError> {
        Ok(self.session.get::<i32>(SESSION_AUTH_USER_ID).await?)
    }

    /// Clears all data from the session.
    ///
    /// Used during logout to remove all session data including authentication
    /// state and any pending login flow data.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF protection session management.
///
/// Handles CSRF token storage and validation for the Discord login flow. Tokens are
/// stored when the login starts and consumed by the OAuth callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores a CSRF token in the session.
    ///
    /// # Returns
    /// - `Ok(())` - Token successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token from the session.
    ///
    /// The token is removed so each one can only be used once.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - CSRF token was found and removed
    /// - `Ok(None)` - No CSRF token in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}

/// Login flow state session management.
///
/// Handles values that must survive the round trip to Discord: where to send the user
/// after a successful login, and the message shown on the login page after a failed one.
pub struct LoginFlowSession<'a> {
    session: &'a Session,
}

impl<'a> LoginFlowSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Remembers the local path to redirect to once the login completes.
    pub async fn set_destination(&self, destination: String) -> Result<(), AppError> {
        self.session
            .insert(SESSION_LOGIN_DESTINATION, destination)
            .await?;
        Ok(())
    }

    /// Retrieves and removes the remembered destination.
    pub async fn take_destination(&self) -> Result<Option<String>, AppError> {
        let destination = self.session.remove(SESSION_LOGIN_DESTINATION).await?;
        Ok(destination)
    }

    /// Stores the message displayed on the next visit of the login page.
    pub async fn set_login_error(&self, message: &str) -> Result<(), AppError> {
        self.session.insert(SESSION_LOGIN_ERROR, message).await?;
        Ok(())
    }

    /// Retrieves and removes the pending login error message.
    pub async fn take_login_error(&self) -> Result<Option<String>, AppError> {
        let message = self.session.remove(SESSION_LOGIN_ERROR).await?;
        Ok(message)
    }
}
