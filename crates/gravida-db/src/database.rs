//! Database connection pooling and table management.

use deadpool_postgres::{Config, ManagerConfig, Object, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;

use crate::error::Result;
use crate::schema;

/// Connection settings, mapped from the application config by the caller.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub max_connections: usize,
}

/// Main database handle. Cheap to clone; connections are checked out of
/// the pool lazily, so construction succeeds even while the server is
/// unreachable.
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    pub fn connect(options: &ConnectOptions) -> Result<Self> {
        let mut config = Config::new();
        config.host = Some(options.host.clone());
        config.port = Some(options.port);
        config.user = Some(options.user.clone());
        config.password = Some(options.password.clone());
        config.dbname = Some(options.dbname.clone());
        config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        config.pool = Some(PoolConfig::new(options.max_connections));

        let pool = config.create_pool(Some(Runtime::Tokio1), NoTls)?;
        Ok(Self { pool })
    }

    /// Check a connection out of the pool.
    pub async fn client(&self) -> Result<Object> {
        Ok(self.pool.get().await?)
    }

    /// Create all tables that do not exist yet.
    pub async fn initialize(&self) -> Result<()> {
        let client = self.client().await?;
        client.batch_execute(schema::SCHEMA_SQL).await?;
        Ok(())
    }

    /// Row counts for every table, for the admin health endpoint.
    pub async fn stats(&self) -> Result<DatabaseStats> {
        let client = self.client().await?;

        let mut tables = Vec::with_capacity(schema::ALL_TABLES.len());
        for table in schema::ALL_TABLES {
            let row = client
                .query_one(&format!("SELECT COUNT(*) FROM {table}"), &[])
                .await?;
            tables.push((table.to_string(), row.get::<_, i64>(0) as u64));
        }

        Ok(DatabaseStats { tables })
    }
}

/// Per-table row counts.
#[derive(Debug, Clone, Default)]
pub struct DatabaseStats {
    pub tables: Vec<(String, u64)>,
}
