use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::errors::{ImsakiaError, Result};
use migration::{Migrator, MigratorTrait};

const IDLE_TIMEOUT: Duration = Duration::from_secs(300);
const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect to SQLite, creating the database file on first run.
pub async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::SqlitePool;
    use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ImsakiaError::database_config(format!("invalid SQLite URL: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(SQLITE_BUSY_TIMEOUT);

    let pool = SqlitePool::connect_with(options).await.map_err(|e| {
        ImsakiaError::database_connection(format!("cannot open SQLite database: {}", e))
    })?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Connect to MySQL or PostgreSQL with pool limits from configuration.
pub async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
    let db_config = &crate::config::get_config().database;
    let connect_timeout = Duration::from_secs(db_config.timeout);

    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(db_config.pool_size)
        .min_connections(db_config.pool_size.min(5))
        .connect_timeout(connect_timeout)
        .acquire_timeout(connect_timeout)
        .idle_timeout(IDLE_TIMEOUT)
        .sqlx_logging(false);

    Database::connect(options).await.map_err(|e| {
        ImsakiaError::database_connection(format!(
            "cannot connect to {} database: {}",
            backend_name.to_uppercase(),
            e
        ))
    })
}

/// Run pending database migrations.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .map_err(|e| ImsakiaError::database_operation(format!("migration failed: {}", e)))?;

    info!("Database migrations completed");
    Ok(())
}
