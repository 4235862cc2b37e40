pub use super::config::Entity as Config;
pub use super::social_auth::Entity as SocialAuth;
pub use super::user::Entity as User;
