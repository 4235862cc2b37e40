use serde::{Deserialize, Serialize};

use super::*;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Settings {
    client_id: String,
    scopes: String,
}

/// Tests reading a configuration object that was never stored.
///
/// Expected: Ok(None)
#[tokio::test]
async fn get_returns_none_when_missing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ConfigRepository::new(db);

    assert_eq!(repo.get::<Settings>("missing").await?, None);
    assert!(!repo.exists("missing").await?);

    Ok(())
}

/// Tests storing an object twice keeps only the latest value.
///
/// Expected: second set overwrites the first
#[tokio::test]
async fn set_replaces_existing_object() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ConfigRepository::new(db);
    repo.set(
        "settings",
        &Settings {
            client_id: "1234".to_string(),
            scopes: "identify".to_string(),
        },
    )
    .await?;
    repo.set(
        "settings",
        &Settings {
            client_id: "5678".to_string(),
            scopes: "identify email".to_string(),
        },
    )
    .await?;

    let stored = repo.get::<Settings>("settings").await?.unwrap();

    assert_eq!(stored.client_id, "5678");
    assert_eq!(stored.scopes, "identify email");
    assert!(repo.exists("settings").await?);

    Ok(())
}

/// Tests a stored document with an unexpected shape surfaces as an internal error.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn get_fails_on_malformed_document() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::config::create_config(db, "settings", serde_json::json!(["not", "an", "object"]))
        .await?;

    let result = ConfigRepository::new(db).get::<Settings>("settings").await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
