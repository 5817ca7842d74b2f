use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

/// Connect to the database with a process-wide pool.
///
/// The schema is provisioned out-of-band; this only establishes the pool
/// that lives until shutdown.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(url.to_string());
    options
        .max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let conn = Database::connect(options)
        .await
        .map_err(|e| AppError::db(format!("failed to connect to database: {e}")))?;

    info!("database pool established");
    Ok(conn)
}
