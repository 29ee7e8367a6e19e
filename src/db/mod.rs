//! Database connection management

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::error::LedgerError;

/// Idempotent bootstrap of the `users` relation
const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// PostgreSQL database connection pool
///
/// Cheap to clone; every clone shares the same pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool and verify it with a ping
    pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<Self, LedgerError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections.min(config.max_connections))
            .max_lifetime(config.max_lifetime())
            .acquire_timeout(config.acquire_timeout())
            .connect(database_url)
            .await
            .map_err(LedgerError::Connection)?;

        let db = Self { pool };
        db.health_check().await?;

        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            max_lifetime_secs = config.max_lifetime_secs,
            "PostgreSQL connection pool established"
        );
        Ok(db)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), LedgerError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(LedgerError::Connection)?;
        Ok(())
    }

    /// Create the `users` relation if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), LedgerError> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(|source| LedgerError::Query {
                context: "ensure schema",
                source,
            })?;
        tracing::info!("users schema ready");
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
