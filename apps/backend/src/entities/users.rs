use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub name: Option<String>,
    /// None for OAuth-only accounts
    #[sea_orm(column_name = "password_hash")]
    pub password_hash: Option<String>,
    /// Stored as SCREAMING_SNAKE_CASE text ("ADMIN" | "TEACHER" | "STUDENT")
    pub role: String,
    #[sea_orm(column_name = "google_id")]
    pub google_id: Option<String>,
    pub avatar: Option<String>,
    /// "email" | "google"
    #[sea_orm(column_name = "auth_provider")]
    pub auth_provider: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
