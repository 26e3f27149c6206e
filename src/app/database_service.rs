//! Connection pool ownership and schema bootstrap.
//!
//! The pool is the only state shared between requests; each repository call checks out a
//! connection for one statement and returns it when the future completes or is dropped.

use crate::domain::model::ModelRegistry;
use crate::infra::config::Config;
use crate::storage::{CarRepo, MechanicRepo, OrderRepo};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Clone)]
pub struct DatabaseService {
    pool: PgPool,
}

impl DatabaseService {
    /// Connects to `config.database_url` and makes sure every table exists.
    pub async fn new(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        tracing::info!(max_connections = config.max_connections, "database pool connected");

        let service = Self::from_pool(pool);
        service.bootstrap_schema(&ModelRegistry::auto_service()).await?;
        Ok(service)
    }

    /// Wraps an existing pool without touching the schema.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn cars(&self) -> CarRepo<'_> {
        CarRepo::new(&self.pool)
    }

    pub fn mechanics(&self) -> MechanicRepo<'_> {
        MechanicRepo::new(&self.pool)
    }

    pub fn orders(&self) -> OrderRepo<'_> {
        OrderRepo::new(&self.pool)
    }

    /// Runs every `CREATE ... IF NOT EXISTS` statement of the registry, in order.
    pub async fn bootstrap_schema(&self, registry: &ModelRegistry) -> Result<(), sqlx::Error> {
        for sql in registry.get_all_create_sql() {
            sqlx::query(sql).execute(&self.pool).await?;
        }
        tracing::info!(tables = ?registry.list_models(), "schema ready");
        Ok(())
    }

    /// Empties every table and restarts the id sequences.
    pub async fn clear_all(&self, registry: &ModelRegistry) -> Result<(), sqlx::Error> {
        let tables = registry.list_models().join(", ");
        sqlx::query(&format!("TRUNCATE TABLE {} RESTART IDENTITY CASCADE", tables))
            .execute(&self.pool)
            .await?;
        tracing::warn!(%tables, "all tables truncated");
        Ok(())
    }

    /// `SELECT 1` round trip.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
