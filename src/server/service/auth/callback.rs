use axum::response::Redirect;

use crate::server::{
    error::auth::{AuthError, LoginFlowError},
    model::{
        auth::CallbackParams,
        profile::AuthenticatedIdentity,
        settings::{ExtraDataPolicy, ProviderSettings},
    },
    service::{
        authenticator::Authenticator,
        network::{DiscordClient, DiscordNetwork},
        settings::DiscordSettingsService,
    },
};

/// Handles Discord's redirect back to the application.
///
/// Every failure before the authenticator returned is reported as a `LoginFlowError`;
/// the caller renders all of them as the same redirect to the login page.
pub struct CallbackService<'a, A: Authenticator> {
    settings: DiscordSettingsService<'a>,
    network: &'a DiscordNetwork,
    authenticator: A,
    policy: ExtraDataPolicy,
}

impl<'a, A: Authenticator> CallbackService<'a, A> {
    pub fn new(
        settings: DiscordSettingsService<'a>,
        network: &'a DiscordNetwork,
        authenticator: A,
        policy: ExtraDataPolicy,
    ) -> Self {
        Self {
            settings,
            network,
            authenticator,
            policy,
        }
    }

    /// Runs the callback flow.
    ///
    /// # Arguments
    /// - `params` - Query parameters Discord redirected with
    /// - `expected_state` - CSRF token taken from the session, if any
    ///
    /// # Returns
    /// - `Ok(Redirect)` - The authenticator's redirect for the logged in user
    /// - `Err(LoginFlowError)` - Why the login was aborted
    pub async fn handle(
        &self,
        params: CallbackParams,
        expected_state: Option<String>,
    ) -> Result<Redirect, LoginFlowError> {
        check_provider_error(&params)?;

        let settings = self.settings.provider_settings().await?;
        let client = self.network.build_client(&settings)?;

        let code = verify_request(params, expected_state.as_deref())?;
        let identity = self.exchange(&client, &settings, code).await?;

        self.delegate(identity).await
    }

    /// Exchanges the code and resolves everything the authenticator needs.
    ///
    /// Extra endpoints are only called for Discord accounts that are not linked yet.
    pub async fn exchange(
        &self,
        client: &DiscordClient,
        settings: &ProviderSettings,
        code: String,
    ) -> Result<AuthenticatedIdentity, LoginFlowError> {
        let access_token = client.exchange_code(code).await?;
        let profile = client.fetch_profile(&access_token).await?;

        let linked = self
            .authenticator
            .check_provider_is_associated(&profile.provider_user_id)
            .await?;

        let extra_data = if linked {
            None
        } else {
            client
                .fetch_extra_details(&access_token, &settings.endpoints, self.policy)
                .await
        };

        Ok(AuthenticatedIdentity::new(profile, access_token, extra_data))
    }

    /// Hands the identity over to the authenticator.
    pub async fn delegate(&self, identity: AuthenticatedIdentity) -> Result<Redirect, LoginFlowError> {
        Ok(self.authenticator.authenticate_user(identity).await?)
    }
}

/// Aborts when Discord redirected back with an `error` parameter.
///
/// This happens when the user denies consent or the authorization request was invalid.
pub fn check_provider_error(params: &CallbackParams) -> Result<(), AuthError> {
    match &params.error {
        Some(error) => Err(AuthError::ProviderDenied {
            error: error.clone(),
            description: params.error_description.clone(),
        }),
        None => Ok(()),
    }
}

/// Validates the CSRF state and extracts the authorization code.
fn verify_request(
    params: CallbackParams,
    expected_state: Option<&str>,
) -> Result<String, AuthError> {
    let state_matches = matches!(
        (params.state.as_deref(), expected_state),
        (Some(received), Some(expected)) if received == expected
    );
    if !state_matches {
        return Err(AuthError::CsrfValidationFailed);
    }

    params
        .code
        .filter(|code| !code.is_empty())
        .ok_or(AuthError::MissingCode)
}
