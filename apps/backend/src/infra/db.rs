//! Database infrastructure - connection management and migration bootstrap.

use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

/// Open a connection pool against the given URL.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(url.to_string());
    options
        .max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let mut last_error = None;
    for attempt in 1..=CONNECT_ATTEMPTS {
        match Database::connect(options.clone()).await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempt, "database connection established after retry");
                }
                return Ok(conn);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < CONNECT_ATTEMPTS {
                    warn!(
                        attempt,
                        max_attempts = CONNECT_ATTEMPTS,
                        "database connection failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(CONNECT_INTERVAL_MS)).await;
                }
            }
        }
    }

    Err(match last_error {
        Some(e) => AppError::db(format!("failed to connect after {CONNECT_ATTEMPTS} attempts: {e}")),
        None => AppError::internal("no error recorded after connect attempts"),
    })
}

/// Single entrypoint used by the app and tests: build the URL from the
/// profile, connect, and bring the schema up to date.
pub async fn bootstrap_db(profile: DbProfile, owner: DbOwner) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, owner)?;
    let conn = connect_db(&url).await?;

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;

    Ok(conn)
}
