//! Repository for links between local users and provider accounts.

use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::server::model::social_auth::{CreateSocialAuthParam, SocialAuthLink};

/// Repository providing database operations on provider account links.
pub struct SocialAuthRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SocialAuthRepository<'a, C> {
    /// Creates a new SocialAuthRepository instance.
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds the link for a provider account.
    ///
    /// # Arguments
    /// - `plugin_id` - Network plugin the link belongs to
    /// - `provider_user_id` - Account id at the provider
    ///
    /// # Returns
    /// - `Ok(Some(SocialAuthLink))` - The account is linked to a local user
    /// - `Ok(None)` - The account is not linked
    /// - `Err(DbErr)` - Database error during query
    pub async fn find(
        &self,
        plugin_id: &str,
        provider_user_id: &str,
    ) -> Result<Option<SocialAuthLink>, DbErr> {
        let entity = entity::prelude::SocialAuth::find()
            .filter(entity::social_auth::Column::PluginId.eq(plugin_id))
            .filter(entity::social_auth::Column::ProviderUserId.eq(provider_user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(SocialAuthLink::from_entity))
    }

    /// Links a local user to a provider account.
    ///
    /// # Returns
    /// - `Ok(SocialAuthLink)` - The created link
    /// - `Err(DbErr)` - Database error during insert, including an existing link
    pub async fn create(&self, param: CreateSocialAuthParam) -> Result<SocialAuthLink, DbErr> {
        let now = Utc::now();
        let entity = entity::prelude::SocialAuth::insert(entity::social_auth::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            plugin_id: ActiveValue::Set(param.plugin_id),
            provider_user_id: ActiveValue::Set(param.provider_user_id),
            token: ActiveValue::Set(param.token),
            additional_data: ActiveValue::Set(param.additional_data),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await?;

        Ok(SocialAuthLink::from_entity(entity))
    }

    /// Replaces the stored access token of a link.
    pub async fn update_token(&self, link_id: i32, token: String) -> Result<(), DbErr> {
        entity::prelude::SocialAuth::update_many()
            .filter(entity::social_auth::Column::Id.eq(link_id))
            .col_expr(
                entity::social_auth::Column::Token,
                sea_orm::sea_query::Expr::value(token),
            )
            .col_expr(
                entity::social_auth::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }
}
