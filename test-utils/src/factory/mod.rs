//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::UserFactory::new(&db)
//!     .name("CustomUser")
//!     .admin(true)
//!     .build()
//!     .await?;
//!
//! let link = factory::social_auth::SocialAuthFactory::new(&db, user.id)
//!     .provider_user_id("80351110224678912")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `social_auth` - Create Discord account links for users
//! - `config` - Store configuration objects

pub mod config;
pub mod helpers;
pub mod social_auth;
pub mod user;
