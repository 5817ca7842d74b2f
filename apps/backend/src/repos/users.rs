//! User repository functions, generic over `ConnectionTrait`.

use std::str::FromStr;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::auth::claims::Role;
use crate::entities::users;
use crate::error::AppError;

pub const PROVIDER_EMAIL: &str = "email";
pub const PROVIDER_GOOGLE: &str = "google";

/// Fields for inserting a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub role: Role,
    pub google_id: Option<String>,
    pub avatar: Option<String>,
    pub auth_provider: &'static str,
}

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, AppError> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
        .map_err(AppError::from)
}

/// Lookup used by Google sign-in: the account may be keyed by the Google id
/// or by the email it was originally created with.
pub async fn find_by_google_id_or_email<C: ConnectionTrait>(
    conn: &C,
    google_id: &str,
    email: &str,
) -> Result<Option<users::Model>, AppError> {
    users::Entity::find()
        .filter(
            Condition::any()
                .add(users::Column::GoogleId.eq(google_id))
                .add(users::Column::Email.eq(email)),
        )
        .one(conn)
        .await
        .map_err(AppError::from)
}

pub async fn create<C: ConnectionTrait>(conn: &C, new: NewUser) -> Result<users::Model, AppError> {
    let now = OffsetDateTime::now_utc();
    let active = users::ActiveModel {
        id: NotSet,
        email: Set(new.email),
        name: Set(new.name),
        password_hash: Set(new.password_hash),
        role: Set(new.role.as_str().to_string()),
        google_id: Set(new.google_id),
        avatar: Set(new.avatar),
        auth_provider: Set(new.auth_provider.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    active.insert(conn).await.map_err(|e| {
        // Unique-violation race with a concurrent signup for the same email
        if e.to_string().contains("unique") || e.to_string().contains("duplicate") {
            AppError::conflict("User already exists")
        } else {
            AppError::from(e)
        }
    })
}

/// Attach a Google identity to an existing account, refreshing the profile
/// fields Google knows better than we do.
pub async fn link_google<C: ConnectionTrait>(
    conn: &C,
    user: users::Model,
    google_id: &str,
    name: Option<&str>,
    avatar: Option<&str>,
) -> Result<users::Model, AppError> {
    let mut active: users::ActiveModel = user.into();
    active.google_id = Set(Some(google_id.to_string()));
    if let Some(name) = name {
        active.name = Set(Some(name.to_string()));
    }
    if let Some(avatar) = avatar {
        active.avatar = Set(Some(avatar.to_string()));
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    active.update(conn).await.map_err(AppError::from)
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, AppError> {
    users::Entity::find().count(conn).await.map_err(AppError::from)
}

/// Parse the stored role. A row with an unknown role string is data
/// corruption, not client error.
pub fn role_of(user: &users::Model) -> Result<Role, AppError> {
    Role::from_str(&user.role)
        .map_err(|_| AppError::internal(format!("user {} has unknown role '{}'", user.id, user.role)))
}
