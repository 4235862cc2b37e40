use sea_orm::EntityTrait;

use super::*;

const DISCORD: &str = "social_auth_discord";

/// Tests a created link can be found by plugin and provider account id.
///
/// Expected: Ok(Some) with the stored extra data
#[tokio::test]
async fn creates_and_finds_link() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::create_user(db).await?;

    let repo = SocialAuthRepository::new(db);
    let created = repo
        .create(CreateSocialAuthParam {
            user_id: user.id,
            plugin_id: DISCORD.to_string(),
            provider_user_id: "80351110224678912".to_string(),
            token: "access-token".to_string(),
            additional_data: Some(serde_json::json!({"user_guilds": []})),
        })
        .await?;

    let found = repo.find(DISCORD, "80351110224678912").await?;

    assert_eq!(found, Some(created));
    assert!(repo.find("social_auth_github", "80351110224678912").await?.is_none());

    Ok(())
}

/// Tests replacing the stored access token of a link.
///
/// Expected: token replaced, updated_at moved forward
#[tokio::test]
async fn update_token_replaces_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, link) = factory::social_auth::create_linked_user(db, "80351110224678912").await?;

    SocialAuthRepository::new(db)
        .update_token(link.id, "refreshed-token".to_string())
        .await?;

    let updated = entity::prelude::SocialAuth::find_by_id(link.id)
        .one(db)
        .await?
        .unwrap();

    assert_eq!(updated.token, "refreshed-token");
    assert!(updated.updated_at >= link.updated_at);

    Ok(())
}
