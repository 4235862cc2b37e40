//! Social Auth Discord Test Utils
//!
//! Provides shared testing utilities for building unit and integration tests for the
//! Discord social login service. This crate offers a builder pattern for creating test
//! contexts with in-memory SQLite databases, a session backed by the same database, and
//! factories for the user and social auth tables.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and session
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn links_discord_account() -> Result<(), TestError> {
//!     let mut test = TestBuilder::new().with_auth_tables().build().await?;
//!     let (db, session) = test.db_and_session().await?;
//!
//!     // Perform database and session operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
