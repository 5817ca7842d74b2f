use futures_util::future::LocalBoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Execute a function within a database transaction.
///
/// Begins a transaction, commits on `Ok`, rolls back on `Err` (best-effort,
/// the original error is preserved). The closure returns a boxed future so
/// it may borrow the transaction for the duration of its work. Callers that
/// invalidate caches must do so only after this returns `Ok`, when the
/// mutation is durably committed.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> LocalBoxFuture<'c, Result<R, AppError>>,
{
    let db = require_db(state)?;
    let txn = db
        .begin()
        .await
        .map_err(|e| AppError::db(format!("failed to begin transaction: {e}")))?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit()
                .await
                .map_err(|e| AppError::db(format!("failed to commit transaction: {e}")))?;
            Ok(val)
        }
        Err(err) => {
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::with_txn;
    use crate::error::AppError;
    use crate::infra::state::build_state;
    use crate::repos;

    #[tokio::test]
    async fn missing_database_fails_before_entering_the_closure() {
        let state = build_state().build();

        // The closure borrows the transaction inside its future, the shape
        // every mutation path uses.
        let result = with_txn(&state, |txn| {
            Box::pin(async move {
                let _ = repos::students::find_by_id(txn, 1).await?;
                Ok(())
            })
        })
        .await;

        match result {
            Err(AppError::Internal { detail }) => {
                assert!(detail.contains("Database connection not available"));
            }
            other => panic!("expected internal error, got {other:?}"),
        }
    }
}
