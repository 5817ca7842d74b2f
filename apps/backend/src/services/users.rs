//! Account lifecycle: signup, password login, and Google sign-in.

use tracing::info;

use crate::auth::claims::Role;
use crate::auth::google::GoogleProfile;
use crate::auth::password::{hash_password, verify_password};
use crate::db::txn::with_txn;
use crate::db::require_db;
use crate::entities::users;
use crate::error::AppError;
use crate::repos;
use crate::repos::users::{NewUser, PROVIDER_EMAIL, PROVIDER_GOOGLE};
use crate::state::app_state::AppState;

/// Register an email/password account. The role defaults to teacher when
/// the client does not send one.
pub async fn signup(
    state: &AppState,
    email: String,
    password: String,
    name: Option<String>,
    role: Option<Role>,
) -> Result<users::Model, AppError> {
    let password_hash = hash_password(&password)?;
    let role = role.unwrap_or(Role::Teacher);

    let user = with_txn(state, |txn| {
        Box::pin(async move {
            if repos::users::find_by_email(txn, &email).await?.is_some() {
                return Err(AppError::conflict("User already exists"));
            }
            repos::users::create(
                txn,
                NewUser {
                    email,
                    name,
                    password_hash: Some(password_hash),
                    role,
                    google_id: None,
                    avatar: None,
                    auth_provider: PROVIDER_EMAIL,
                },
            )
            .await
        })
    })
    .await?;

    info!(user_id = user.id, "user signed up");
    Ok(user)
}

/// Check email/password credentials.
///
/// Every failure mode collapses into the same `InvalidCredentials` error so
/// the response does not reveal whether the email exists or whether the
/// account is Google-only.
pub async fn authenticate(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<users::Model, AppError> {
    let db = require_db(state)?;

    let user = repos::users::find_by_email(db, email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let hash = user
        .password_hash
        .as_deref()
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(password, hash)? {
        return Err(AppError::invalid_credentials());
    }

    Ok(user)
}

/// Resolve a verified Google profile to a local account, creating one when
/// none matches.
///
/// Returns the account and whether it was created by this call. An existing
/// email/password account with the same address gets the Google identity
/// linked rather than a duplicate row.
pub async fn ensure_google_user(
    state: &AppState,
    profile: GoogleProfile,
) -> Result<(users::Model, bool), AppError> {
    let (user, created) = with_txn(state, |txn| {
        Box::pin(async move {
            let existing =
                repos::users::find_by_google_id_or_email(txn, &profile.google_id, &profile.email)
                    .await?;

            match existing {
                Some(user) if user.google_id.is_none() => {
                    let user = repos::users::link_google(
                        txn,
                        user,
                        &profile.google_id,
                        profile.name.as_deref(),
                        profile.avatar.as_deref(),
                    )
                    .await?;
                    Ok((user, false))
                }
                Some(user) => Ok((user, false)),
                None => {
                    let user = repos::users::create(
                        txn,
                        NewUser {
                            email: profile.email,
                            name: profile.name,
                            password_hash: None,
                            role: Role::Teacher,
                            google_id: Some(profile.google_id),
                            avatar: profile.avatar,
                            auth_provider: PROVIDER_GOOGLE,
                        },
                    )
                    .await?;
                    Ok((user, true))
                }
            }
        })
    })
    .await?;

    if created {
        info!(user_id = user.id, "user created via Google sign-in");
    }
    Ok((user, created))
}
