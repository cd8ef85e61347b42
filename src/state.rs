use std::sync::Arc;

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::HubConfig;
use crate::db::pool::{open_ro_pool, DbPool};
use crate::error::DataAccessError;

/// Shared application state, passed to all route handlers via
/// `axum::extract::State`.
pub struct AppState {
    pub config: HubConfig,

    /// Read pool over the market DB (optional: the file might not exist
    /// yet when the hub starts).
    pub pool: Option<DbPool>,
}

impl AppState {
    pub fn new(config: HubConfig) -> Arc<Self> {
        let pool = open_ro_pool(&config.db_path, config.pool_size);
        Arc::new(Self { config, pool })
    }

    /// Check out a read connection for the duration of one handler call.
    ///
    /// When the DB file was missing at startup, a one-shot open is tried so
    /// a freshly ingested file is picked up without a restart.
    pub fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, DataAccessError> {
        if let Some(pool) = &self.pool {
            return pool.get().map_err(DataAccessError::from);
        }

        let pool = open_ro_pool(&self.config.db_path, 1).ok_or_else(|| {
            DataAccessError::Unavailable(format!(
                "db not found: {}",
                self.config.db_path.display()
            ))
        })?;
        pool.get().map_err(DataAccessError::from)
    }
}
