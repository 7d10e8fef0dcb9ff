//! Error types shared across the crate.
//!
//! Every failure mode carries the offending type, column, or value so callers
//! can diagnose problems without enabling SQL diagnostics. The engine never
//! retries: errors propagate to the caller as soon as they are detected.

use std::error::Error;
use std::fmt;

/// Crate-wide error type.
#[derive(Debug)]
pub enum DbError {
    /// Mapping metadata is missing or inconsistent (no primary key, duplicate
    /// primary keys, unknown column or field name).
    Mapping(String),
    /// The configured database-type string does not match any known dialect.
    /// Raised at dialect selection time, never at first query.
    UnsupportedDialect(String),
    /// A condition combinator was asked to build a disallowed fragment, such
    /// as a non-empty-only IN over an empty value list.
    InvalidCondition(String),
    /// An insert under the `Assigned` strategy found a null primary key.
    MissingPrimaryKey(String),
    /// The snowflake generator observed the clock moving backwards.
    ClockMovedBackward {
        last_millis: u64,
        now_millis: u64,
    },
    /// A value could not be bound or extracted because no conversion exists
    /// between the runtime value and the requested type.
    UnsupportedType(String),
    /// A paged query requested more rows per page than the configured cap.
    MaxPageSizeExceeded {
        page_size: i64,
        max_page_size: i64,
    },
    /// Any failure surfaced by the underlying database call, preserving the
    /// original cause.
    Execution {
        message: String,
        source: Option<Box<dyn Error + Send + Sync>>,
    },
}

impl DbError {
    /// Build an [`DbError::Execution`] from a plain message.
    pub fn execution(message: impl Into<String>) -> Self {
        DbError::Execution {
            message: message.into(),
            source: None,
        }
    }

    /// Build an [`DbError::Execution`] wrapping a driver-level cause.
    pub fn execution_with(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        DbError::Execution {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::Mapping(s) => {
                write!(f, "Mapping error: {s}")
            }
            DbError::UnsupportedDialect(s) => {
                write!(f, "Unsupported database type: {s}")
            }
            DbError::InvalidCondition(s) => {
                write!(f, "Invalid condition: {s}")
            }
            DbError::MissingPrimaryKey(s) => {
                write!(f, "Missing primary key: {s}")
            }
            DbError::ClockMovedBackward {
                last_millis,
                now_millis,
            } => {
                write!(
                    f,
                    "Clock moved backwards: refusing to generate id for {} milliseconds",
                    last_millis.saturating_sub(*now_millis)
                )
            }
            DbError::UnsupportedType(s) => {
                write!(f, "Unsupported type: {s}")
            }
            DbError::MaxPageSizeExceeded {
                page_size,
                max_page_size,
            } => {
                write!(
                    f,
                    "Page size {page_size} exceeds the configured maximum of {max_page_size}"
                )
            }
            DbError::Execution { message, .. } => {
                write!(f, "Execution error: {message}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DbError::Execution {
                source: Some(cause),
                ..
            } => Some(cause.as_ref() as &(dyn Error + 'static)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_all_variants() {
        assert!(DbError::Mapping("no pk".into())
            .to_string()
            .contains("Mapping error"));
        assert!(DbError::UnsupportedDialect("db2".into())
            .to_string()
            .contains("Unsupported database type"));
        assert!(DbError::InvalidCondition("empty IN".into())
            .to_string()
            .contains("Invalid condition"));
        assert!(DbError::MissingPrimaryKey("tb_user.id".into())
            .to_string()
            .contains("Missing primary key"));
        assert!(DbError::UnsupportedType("Bytes".into())
            .to_string()
            .contains("Unsupported type"));
    }

    #[test]
    fn test_clock_moved_backward_reports_delta() {
        let err = DbError::ClockMovedBackward {
            last_millis: 1_000,
            now_millis: 400,
        };
        assert!(err.to_string().contains("600 milliseconds"));
    }

    #[test]
    fn test_execution_preserves_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "connection reset");
        let err = DbError::execution_with("statement failed", cause);
        assert!(err.to_string().contains("statement failed"));
        assert!(err.source().unwrap().to_string().contains("connection reset"));
    }

    #[test]
    fn test_max_page_size_exceeded_display() {
        let err = DbError::MaxPageSizeExceeded {
            page_size: 100,
            max_page_size: 50,
        };
        let text = err.to_string();
        assert!(text.contains("100"));
        assert!(text.contains("50"));
    }
}
