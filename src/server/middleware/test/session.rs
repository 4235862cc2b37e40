use super::*;

#[tokio::test]
async fn csrf_token_can_only_be_taken_once() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();
    let csrf = CsrfSession::new(session);

    csrf.set_token("state-123".to_string()).await?;

    assert_eq!(csrf.take_token().await?.as_deref(), Some("state-123"));
    assert_eq!(csrf.take_token().await?, None);

    Ok(())
}

#[tokio::test]
async fn login_error_is_shown_once() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();
    let flow = LoginFlowSession::new(session);

    flow.set_login_error("Nope").await?;

    assert_eq!(flow.take_login_error().await?.as_deref(), Some("Nope"));
    assert_eq!(flow.take_login_error().await?, None);

    Ok(())
}

/// Tests login keeps the pending destination while storing the user.
#[tokio::test]
async fn login_preserves_pending_destination() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    LoginFlowSession::new(session)
        .set_destination("/forum".to_string())
        .await?;
    AuthSession::new(session).login(7).await?;

    assert_eq!(AuthSession::new(session).get_user_id().await?, Some(7));
    assert_eq!(
        LoginFlowSession::new(session).take_destination().await?.as_deref(),
        Some("/forum")
    );

    Ok(())
}

#[tokio::test]
async fn clear_logs_user_out() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();
    let auth = AuthSession::new(session);

    auth.set_user_id(7).await?;
    auth.clear().await;

    assert_eq!(auth.get_user_id().await?, None);

    Ok(())
}
