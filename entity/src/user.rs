use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub email: Option<String>,
    pub avatar_hash: Option<String>,
    pub admin: bool,
    pub created_at: DateTimeUtc,
    pub last_login_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::social_auth::Entity")]
    SocialAuth,
}

impl Related<super::social_auth::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialAuth.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
