//! Discord identity data produced by a successful authorization-code exchange.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::server::error::auth::AuthError;

/// Subset of Discord's `GET /users/@me` response used for login.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    /// Whether Discord verified `email`. Absent when the `email` scope was not granted.
    #[serde(default)]
    pub verified: Option<bool>,
}

/// The authenticated Discord user's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedProfile {
    /// Discord user id (snowflake, kept as string).
    pub provider_user_id: String,
    pub username: String,
    pub email: Option<String>,
    /// Only `true` when Discord reported the email as verified.
    pub email_verified: bool,
    pub avatar_hash: Option<String>,
}

impl TryFrom<DiscordUser> for AuthorizedProfile {
    type Error = AuthError;

    fn try_from(user: DiscordUser) -> Result<Self, Self::Error> {
        if user.id.trim().is_empty() {
            return Err(AuthError::InvalidProfile("missing user id".to_string()));
        }
        if user.username.trim().is_empty() {
            return Err(AuthError::InvalidProfile(format!(
                "user {} has no username",
                user.id
            )));
        }

        Ok(Self {
            provider_user_id: user.id,
            username: user.username,
            email: user.email.filter(|email| !email.trim().is_empty()),
            email_verified: user.verified == Some(true),
            avatar_hash: user.avatar.filter(|hash| !hash.is_empty()),
        })
    }
}

/// Raw responses of the extra endpoints, keyed by endpoint name.
pub type ExtraProfileData = BTreeMap<String, serde_json::Value>;

/// Everything handed to the authenticator once Discord vouched for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedIdentity {
    pub username: String,
    pub email: Option<String>,
    /// An unverified email is never used to match an existing user.
    pub email_verified: bool,
    pub provider_user_id: String,
    pub access_token: String,
    pub avatar_hash: Option<String>,
    /// `None` when the account was already linked or no endpoints are configured.
    pub extra_data: Option<ExtraProfileData>,
}

impl AuthenticatedIdentity {
    pub fn new(
        profile: AuthorizedProfile,
        access_token: String,
        extra_data: Option<ExtraProfileData>,
    ) -> Self {
        Self {
            username: profile.username,
            email: profile.email,
            email_verified: profile.email_verified,
            provider_user_id: profile.provider_user_id,
            access_token,
            avatar_hash: profile.avatar_hash,
            extra_data,
        }
    }
}
