//! Student roster operations.
//!
//! Mutations run inside a transaction. Callers that serve the admin stats
//! snapshot must invalidate it after a mutation here returns `Ok`.

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::entities::students;
use crate::error::AppError;
use crate::repos;
use crate::repos::students::{StudentPage, StudentPatch};
use crate::state::app_state::AppState;

pub async fn list(state: &AppState, page: u64, per_page: u64) -> Result<StudentPage, AppError> {
    let db = require_db(state)?;
    repos::students::list_page(db, page, per_page).await
}

pub async fn get(state: &AppState, id: i64) -> Result<students::Model, AppError> {
    let db = require_db(state)?;
    repos::students::find_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Student not found"))
}

pub async fn create(
    state: &AppState,
    name: String,
    grade: i32,
    section: String,
) -> Result<students::Model, AppError> {
    with_txn(state, |txn| {
        Box::pin(async move { repos::students::create(txn, &name, grade, &section).await })
    })
    .await
}

pub async fn update(
    state: &AppState,
    id: i64,
    patch: StudentPatch,
) -> Result<students::Model, AppError> {
    with_txn(state, |txn| {
        Box::pin(async move {
            let student = repos::students::find_by_id(txn, id)
                .await?
                .ok_or_else(|| AppError::not_found("Student not found"))?;
            repos::students::update(txn, student, patch).await
        })
    })
    .await
}

pub async fn remove(state: &AppState, id: i64) -> Result<(), AppError> {
    with_txn(state, |txn| {
        Box::pin(async move {
            if !repos::students::delete(txn, id).await? {
                return Err(AppError::not_found("Student not found"));
            }
            Ok(())
        })
    })
    .await
}
