//! Runtime configuration.
//!
//! Values come from an optional `config/shoal.toml` file overlaid with
//! `SHOAL__`-prefixed environment variables, under a `database` section:
//!
//! ```toml
//! [database]
//! db_type = "postgresql"
//! batch_size = 500
//! show_sql = true
//! ```

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::connection::IsolationLevel;
use crate::error::DbError;

/// Engine configuration. Every field has a default so a bare deployment
/// works without a config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    /// Vendor name used to resolve the SQL dialect.
    pub db_type: String,
    /// Rows per chunk for batched writes.
    pub batch_size: usize,
    /// Driver fetch size hint for result cursors.
    pub fetch_size: u32,
    /// Statement timeout in seconds; 0 disables it.
    pub query_timeout_seconds: u32,
    /// Log every statement and its parameters at debug level.
    pub show_sql: bool,
    /// Log result rows and affected counts at debug level.
    pub show_result: bool,
    /// Upper bound on requested page sizes; non-positive disables the check.
    pub max_page_size: i64,
    /// Isolation level used when a transaction does not specify one.
    pub default_isolation: IsolationLevel,
    /// Worker id embedded in snowflake keys (0..=31).
    pub worker_id: u64,
    /// Datacenter id embedded in snowflake keys (0..=31).
    pub data_center_id: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            db_type: "mysql".to_string(),
            batch_size: 200,
            fetch_size: 1000,
            query_timeout_seconds: 60,
            show_sql: false,
            show_result: false,
            max_page_size: -1,
            default_isolation: IsolationLevel::default(),
            worker_id: 1,
            data_center_id: 1,
        }
    }
}

impl DbConfig {
    /// Load from `config/shoal.toml` (if present) and the environment.
    pub fn load() -> Result<Self, DbError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/shoal").required(false))
            .add_source(Environment::with_prefix("SHOAL").separator("__"))
            .build()
            .map_err(|e| DbError::execution_with("failed to read configuration", e))?;

        match settings.get::<DbConfig>("database") {
            Ok(config) => Ok(config),
            Err(config::ConfigError::NotFound(_)) => Ok(DbConfig::default()),
            Err(e) => Err(DbError::execution_with("invalid configuration", e)),
        }
    }
}
