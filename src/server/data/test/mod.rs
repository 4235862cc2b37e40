use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::{config::ConfigRepository, social_auth::SocialAuthRepository, user::UserRepository},
    error::AppError,
    model::{social_auth::CreateSocialAuthParam, user::CreateUserParam},
};

mod config;
mod social_auth;
mod user;
