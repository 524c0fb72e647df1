use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::filter::FilterError;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DatabaseError {
    /// Classify constraint violations raised by INSERT/UPDATE statements.
    pub fn from_write(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return DatabaseError::Conflict(conflict_message.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return DatabaseError::NotFound("Referenced record not found".to_string());
            }
        }
        DatabaseError::Sqlx(err)
    }

    /// True when the pool could not reach the database at all
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut)
                | DatabaseError::Sqlx(sqlx::Error::PoolClosed)
                | DatabaseError::Sqlx(sqlx::Error::Io(_))
        )
    }
}

impl From<FilterError> for DatabaseError {
    fn from(err: FilterError) -> Self {
        DatabaseError::QueryError(err.to_string())
    }
}

/// Builds the connection pool handed to the router state
pub struct DatabaseManager;

impl DatabaseManager {
    /// Create a pool without opening a connection. Connections are
    /// established on first use, so the server can boot while the
    /// database is still coming up.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let options = Self::connect_options(config)?;
        let pool = Self::pool_options(config).connect_lazy_with(options);
        info!("Configured database pool for {}", Self::redacted_url(config.url.as_deref().unwrap_or_default()));
        Ok(pool)
    }

    /// Create a pool and eagerly open the first connection
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let options = Self::connect_options(config)?;
        let pool = Self::pool_options(config).connect_with(options).await?;
        info!("Connected database pool for {}", Self::redacted_url(config.url.as_deref().unwrap_or_default()));
        Ok(pool)
    }

    fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let options = PgConnectOptions::from_str(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if config.enable_query_logging {
            Ok(options)
        } else {
            Ok(options.disable_statement_logging())
        }
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Strip credentials from a connection URL before it reaches the logs
    pub fn redacted_url(raw: &str) -> String {
        match url::Url::parse(raw) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("***"));
                }
                url.to_string()
            }
            Err(_) => "<invalid database url>".to_string(),
        }
    }
}
