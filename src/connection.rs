//! The driver boundary: traits a concrete database driver implements.
//!
//! The execution engine never talks to a vendor client directly. It acquires
//! a [`Connection`] from a [`ConnectionProvider`] and drives everything
//! through these traits, which keeps the engine testable against the mock
//! driver and leaves pooling to the provider.

use serde::Deserialize;

use crate::error::DbError;
use crate::row::Row;
use crate::value::Value;

/// Transaction isolation levels, mapped to the standard SQL names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl Default for IsolationLevel {
    fn default() -> Self {
        IsolationLevel::ReadCommitted
    }
}

impl IsolationLevel {
    pub fn to_sql(self) -> &'static str {
        match self {
            IsolationLevel::ReadUncommitted => "READ UNCOMMITTED",
            IsolationLevel::ReadCommitted => "READ COMMITTED",
            IsolationLevel::RepeatableRead => "REPEATABLE READ",
            IsolationLevel::Serializable => "SERIALIZABLE",
        }
    }
}

/// Per-statement tuning applied to every statement a connection prepares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementOptions {
    /// Driver fetch size hint for result cursors.
    pub fetch_size: u32,
    /// Statement timeout in seconds; 0 disables the timeout.
    pub query_timeout_seconds: u32,
}

impl Default for StatementOptions {
    fn default() -> Self {
        Self {
            fetch_size: 1000,
            query_timeout_seconds: 60,
        }
    }
}

/// Outcome of a write statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecResult {
    pub affected_rows: u64,
    /// Database-generated keys, in the order the rows were sent. Empty unless
    /// key return was requested and the driver produced any.
    pub generated_keys: Vec<Value>,
}

/// One live database connection.
///
/// Implementations are plain blocking drivers; the engine owns exactly one
/// connection per [`Database`](crate::database::Database) context and is
/// responsible for returning it via drop.
pub trait Connection: Send {
    /// Apply statement tuning for all subsequent statements.
    fn configure(&mut self, options: StatementOptions);

    /// Run a query and materialize every row.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>, DbError>;

    /// Run a write statement.
    fn execute(
        &mut self,
        sql: &str,
        params: &[Value],
        return_generated_keys: bool,
    ) -> Result<ExecResult, DbError>;

    /// Run one statement once per parameter row, as a driver batch.
    fn execute_batch(
        &mut self,
        sql: &str,
        rows: &[Vec<Value>],
        return_generated_keys: bool,
    ) -> Result<ExecResult, DbError>;

    /// Begin a transaction at the given isolation level.
    fn begin(&mut self, isolation: IsolationLevel) -> Result<(), DbError>;

    fn commit(&mut self) -> Result<(), DbError>;

    fn rollback(&mut self) -> Result<(), DbError>;
}

/// Source of connections. A pool, a single reconnecting socket, or the mock
/// driver all sit behind this.
pub trait ConnectionProvider: Send + Sync {
    fn acquire(&self) -> Result<Box<dyn Connection>, DbError>;
}
