//! Document database connection pool management.

use relief_config::StorageConfig;
use relief_core::{ReliefError, ReliefResult};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{info, warn};

/// Document database pool wrapper.
#[derive(Clone)]
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn connect(config: &StorageConfig) -> ReliefResult<Self> {
        info!("Connecting to document database...");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .connect(&config.database_url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                ReliefError::Database(format!("Failed to connect: {}", e))
            })?;

        info!("Document database pool established");
        Ok(Self { pool })
    }

    /// Creates a private in-memory database, mainly for tests.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection.
    pub async fn in_memory() -> ReliefResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| ReliefError::Database(format!("Failed to connect: {}", e)))?;
        Ok(Self { pool })
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks if the database connection is healthy.
    pub async fn health_check(&self) -> ReliefResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| ReliefError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Runs database migrations.
    pub async fn run_migrations(&self) -> ReliefResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ReliefError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Closes the database pool.
    pub async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_migrates() {
        let pool = DatabasePool::in_memory().await.unwrap();
        pool.run_migrations().await.unwrap();
        pool.health_check().await.unwrap();
    }
}
