//! # Shoal
//!
//! Typed relational-database access layer: declarative entity mapping,
//! vendor-aware SQL generation, and scoped connection/transaction contexts
//! over any blocking driver.
//!
//! See [README on GitHub](https://github.com/microscaler/shoal)

pub mod clause;
pub mod config;
pub mod connection;
pub mod database;
pub mod dialect;
pub mod entity;
pub mod error;
pub mod metadata;
#[cfg(feature = "mock")]
pub mod mock;
pub mod page;
pub mod pk;
pub mod row;
pub mod sql_log;
#[cfg(any(test, feature = "mock"))]
pub mod tests_cfg;
pub mod value;

pub use clause::{Cond, ConditionField, ConditionSource, Sql};
pub use config::DbConfig;
pub use connection::{Connection, ConnectionProvider, ExecResult, IsolationLevel};
pub use database::{Database, DbTemplate};
pub use entity::{Attribute, Entity};
pub use error::DbError;
pub use page::{Page, PageLite, Pageable};
pub use pk::GenerationType;
pub use row::{FromRow, Record, Row};
pub use value::{TryGetable, Value, ValueType};
