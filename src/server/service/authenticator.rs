//! Provisioning of local users for Discord identities.
//!
//! The callback flow only knows the `Authenticator` trait: whether a Discord account is
//! already linked, and how to turn a verified identity into a logged in session. The
//! database-backed `SocialAuthUserAuthenticator` is what the server wires in.

use std::collections::HashSet;

use async_trait::async_trait;
use axum::response::Redirect;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tower_sessions::Session;

use crate::server::{
    data::{social_auth::SocialAuthRepository, user::UserRepository},
    error::AppError,
    middleware::session::{AuthSession, LoginFlowSession},
    model::{
        profile::AuthenticatedIdentity,
        settings::DISCORD_PLUGIN_ID,
        social_auth::CreateSocialAuthParam,
        user::{CreateUserParam, User},
    },
};

/// Where users land after logging in without a remembered destination.
pub const DEFAULT_LOGIN_DESTINATION: &str = "/user";

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Whether a local user is already linked to the Discord account `provider_user_id`.
    async fn check_provider_is_associated(&self, provider_user_id: &str) -> Result<bool, AppError>;

    /// Logs in (creating or linking a user when needed) and returns where to send them.
    async fn authenticate_user(&self, identity: AuthenticatedIdentity) -> Result<Redirect, AppError>;
}

/// Authenticator storing Discord links in the `social_auth` table.
pub struct SocialAuthUserAuthenticator<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> SocialAuthUserAuthenticator<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }
}

#[async_trait]
impl Authenticator for SocialAuthUserAuthenticator<'_> {
    async fn check_provider_is_associated(&self, provider_user_id: &str) -> Result<bool, AppError> {
        let link = SocialAuthRepository::new(self.db)
            .find(DISCORD_PLUGIN_ID, provider_user_id)
            .await?;

        Ok(link.is_some())
    }

    async fn authenticate_user(&self, identity: AuthenticatedIdentity) -> Result<Redirect, AppError> {
        let txn = self.db.begin().await?;

        let user_id = resolve_user(&txn, &identity).await?;
        UserRepository::new(&txn)
            .record_login(user_id, identity.avatar_hash.clone())
            .await?;

        txn.commit().await?;

        AuthSession::new(self.session).login(user_id).await?;

        let destination = LoginFlowSession::new(self.session)
            .take_destination()
            .await?
            .unwrap_or_else(|| DEFAULT_LOGIN_DESTINATION.to_string());

        tracing::info!(
            "User {} logged in with Discord account {}",
            user_id,
            identity.provider_user_id
        );

        Ok(Redirect::to(&destination))
    }
}

/// Finds the local user for `identity`, linking or creating one when needed.
///
/// Runs on the caller's transaction so a user is never left behind without its link.
async fn resolve_user<C: ConnectionTrait>(
    db: &C,
    identity: &AuthenticatedIdentity,
) -> Result<i32, AppError> {
    let social_auth_repo = SocialAuthRepository::new(db);

    if let Some(link) = social_auth_repo
        .find(DISCORD_PLUGIN_ID, &identity.provider_user_id)
        .await?
    {
        social_auth_repo
            .update_token(link.id, identity.access_token.clone())
            .await?;
        return Ok(link.user_id);
    }

    let user = match find_by_verified_email(db, identity).await? {
        Some(user) => {
            tracing::info!(
                "Linking Discord account {} to existing user {}",
                identity.provider_user_id,
                user.id
            );
            user
        }
        None => create_user(db, identity).await?,
    };

    let additional_data = identity
        .extra_data
        .clone()
        .map(|data| serde_json::Value::Object(data.into_iter().collect()));

    social_auth_repo
        .create(CreateSocialAuthParam {
            user_id: user.id,
            plugin_id: DISCORD_PLUGIN_ID.to_string(),
            provider_user_id: identity.provider_user_id.clone(),
            token: identity.access_token.clone(),
            additional_data,
        })
        .await?;

    Ok(user.id)
}

/// Looks up an existing user by email, but only when Discord verified that email.
async fn find_by_verified_email<C: ConnectionTrait>(
    db: &C,
    identity: &AuthenticatedIdentity,
) -> Result<Option<User>, AppError> {
    let Some(email) = identity.email.as_deref() else {
        return Ok(None);
    };

    if !identity.email_verified {
        tracing::debug!(
            "Discord account {} has an unverified email, not matching existing users",
            identity.provider_user_id
        );
        return Ok(None);
    }

    Ok(UserRepository::new(db).find_by_email(email).await?)
}

/// Creates a user for an identity that matches nobody.
///
/// The first user ever created becomes an admin so a fresh installation can be
/// administered.
async fn create_user<C: ConnectionTrait>(
    db: &C,
    identity: &AuthenticatedIdentity,
) -> Result<User, AppError> {
    let user_repo = UserRepository::new(db);

    let taken: HashSet<String> = user_repo
        .names_starting_with(&identity.username)
        .await?
        .into_iter()
        .collect();
    let name = unique_name(&identity.username, &taken);
    let admin = !user_repo.admin_exists().await?;

    let user = user_repo
        .create(CreateUserParam {
            name,
            email: identity.email.clone(),
            avatar_hash: identity.avatar_hash.clone(),
            admin,
        })
        .await?;

    tracing::info!(
        "Created user {} ({}) for Discord account {}",
        user.name,
        user.id,
        identity.provider_user_id
    );
    if admin {
        tracing::info!("User {} has been set as admin", user.name);
    }

    Ok(user)
}

/// Returns `username`, or the first `username_N` not in `taken`.
fn unique_name(username: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(username) {
        return username.to_string();
    }

    (1..)
        .map(|suffix| format!("{}_{}", username, suffix))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| username.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(names: &[&str]) -> HashSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn keeps_free_name() {
        assert_eq!(unique_name("Nelly", &taken(&["Nelly_1", "nelly"])), "Nelly");
    }

    #[test]
    fn skips_taken_suffixes() {
        assert_eq!(
            unique_name("Nelly", &taken(&["Nelly", "Nelly_1", "Nelly_3"])),
            "Nelly_2"
        );
    }
}
