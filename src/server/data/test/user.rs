use super::*;

fn new_user(name: &str, email: Option<&str>, admin: bool) -> CreateUserParam {
    CreateUserParam {
        name: name.to_string(),
        email: email.map(str::to_string),
        avatar_hash: None,
        admin,
    }
}

/// Tests creating a user stores the email trimmed and lowercased.
///
/// Expected: Ok with normalized email and no login recorded yet
#[tokio::test]
async fn create_normalizes_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserRepository::new(db)
        .create(new_user("Nelly", Some(" Nelly@Example.COM "), false))
        .await?;

    assert_eq!(user.name, "Nelly");
    assert_eq!(user.email.as_deref(), Some("nelly@example.com"));
    assert!(user.last_login_at.is_none());

    Ok(())
}

/// Tests two users cannot share a name.
///
/// Expected: Err(DbErr) on the second insert
#[tokio::test]
async fn create_rejects_duplicate_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(new_user("Nelly", None, false)).await?;

    let result = repo.create(new_user("Nelly", None, false)).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests email lookup ignores case and surrounding whitespace of the input.
///
/// Expected: Ok(Some) for a differently cased address, Ok(None) for another address
#[tokio::test]
async fn find_by_email_ignores_case() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(new_user("Nelly", Some("nelly@example.com"), false))
        .await?;

    let found = repo.find_by_email("  NELLY@example.com").await?;

    assert_eq!(found.map(|u| u.id), Some(user.id));
    assert!(repo.find_by_email("other@example.com").await?.is_none());

    Ok(())
}

/// Tests the admin existence check.
///
/// Expected: false until an admin user exists
#[tokio::test]
async fn reports_existing_admins() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(!repo.admin_exists().await?);

    factory::user::UserFactory::new(db).name("Nelly").build().await?;

    assert!(!repo.admin_exists().await?);

    factory::user::UserFactory::new(db).admin(true).build().await?;

    assert!(repo.admin_exists().await?);

    Ok(())
}

/// Tests collecting the names sharing a prefix in one query.
///
/// Expected: the name itself and its suffixed variants, not unrelated names
#[tokio::test]
async fn lists_names_with_prefix() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["Nelly", "Nelly_1", "Nelly_7", "Wumpus"] {
        factory::user::UserFactory::new(db).name(name).build().await?;
    }

    let mut names = UserRepository::new(db).names_starting_with("Nelly").await?;
    names.sort();

    assert_eq!(names, vec!["Nelly", "Nelly_1", "Nelly_7"]);

    Ok(())
}

/// Tests recording a login stamps the time and replaces the avatar hash.
///
/// Expected: last_login_at set, avatar_hash updated
#[tokio::test]
async fn record_login_updates_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .avatar_hash("old-avatar")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    repo.record_login(user.id, Some("new-avatar".to_string()))
        .await?;

    let updated = repo.find_by_id(user.id).await?.unwrap();

    assert_eq!(updated.avatar_hash.as_deref(), Some("new-avatar"));
    assert!(updated.last_login_at.is_some());

    Ok(())
}

/// Tests looking up an id nobody has.
///
/// Expected: Ok(None)
#[tokio::test]
async fn find_by_id_returns_none_for_unknown_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(UserRepository::new(db).find_by_id(4242).await?.is_none());

    Ok(())
}
