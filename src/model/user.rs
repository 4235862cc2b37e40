use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub avatar_hash: Option<String>,
    pub admin: bool,
    pub last_login_at: Option<DateTime<Utc>>,
}
