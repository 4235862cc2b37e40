use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// In-memory environment a single test runs against.
///
/// The SQLite database is opened on first use. The session lives in the same database,
/// so a test sees exactly what the session layer would persist in production.
pub struct TestContext {
    /// In-memory SQLite connection, `None` until first requested.
    pub db: Option<DatabaseConnection>,

    /// Session stored in `db`, `None` until first requested.
    pub session: Option<Session>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Returns the database connection, opening `sqlite::memory:` when needed.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            self.db = Some(Database::connect("sqlite::memory:").await?);
        }

        self.db
            .as_ref()
            .ok_or_else(|| sea_orm::DbErr::Custom("database not initialized".to_string()).into())
    }

    /// Executes the given CREATE TABLE statements in order.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in &stmts {
            db.execute(stmt).await?;
        }

        Ok(())
    }

    /// Returns the test session, creating the session table on first use.
    ///
    /// # Returns
    /// - `Ok(&Session)` - Fresh, empty session with a 7 day inactivity expiry
    /// - `Err(TestError::Database)` - Database or session table could not be created
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            let db = self.database().await?;
            let session = open_session(db).await?;
            self.session = Some(session);
        }

        self.session
            .as_ref()
            .ok_or_else(|| sea_orm::DbErr::Custom("session not initialized".to_string()).into())
    }

    /// Returns the database and the session together.
    ///
    /// Needed by tests holding both at once, which separate `&mut self` calls would not
    /// allow.
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.session().await?;

        match (self.db.as_ref(), self.session.as_ref()) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => Err(sea_orm::DbErr::Custom("test context not initialized".to_string()).into()),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the session table in `db` and a new session backed by it.
async fn open_session(db: &DatabaseConnection) -> Result<Session, TestError> {
    let store = SqliteStore::new(db.get_sqlite_connection_pool().clone());

    store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    Ok(Session::new(
        None,
        Arc::new(store),
        Some(Expiry::OnInactivity(Duration::days(7))),
    ))
}
