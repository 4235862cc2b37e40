use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{config::Config, error::AppError, service::settings::DiscordSettingsService};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// The cookie uses `SameSite=Lax` so it is sent along with Discord's top-level redirect
/// back to the callback route. The cookie is marked secure whenever the application is
/// served over HTTPS.
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer ready to wrap the router
/// - `Err(AppError::DbErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    let session = SessionManagerLayer::new(session_store)
        .with_secure(config.app_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session)
}

/// Seeds and validates the stored Discord settings.
///
/// Credentials from the environment are stored when no settings exist yet. Startup then
/// fails unless usable credentials are stored.
///
/// # Returns
/// - `Ok(())` - Stored settings hold a client id and secret
/// - `Err(AppError::ConfigErr(MissingClientCredentials))` - Credentials are missing
pub async fn check_discord_settings(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<(), AppError> {
    let settings_service = DiscordSettingsService::new(db);

    settings_service
        .seed(
            config.discord_client_id.as_deref(),
            config.discord_client_secret.as_deref(),
        )
        .await?;

    let settings = settings_service.validate().await.inspect_err(|e| {
        tracing::error!("{}", e);
    })?;

    tracing::info!(
        "Discord login configured for client {} with scopes {}",
        settings.client_id,
        settings.scopes.join(" ")
    );

    Ok(())
}
