//! Runtime value model bridging Rust field types and database columns.
//!
//! [`Value`] is the currency of the whole engine: entity accessors produce it,
//! the condition builder collects it, drivers bind it, and result rows carry
//! it back. Every variant wraps an `Option` so a null keeps the column type it
//! belongs to (`Value::Int(None)` is an integer null, not a generic null),
//! which is what lets drivers bind the native SQL null of the right type.

mod try_getable;
mod types;

pub use try_getable::TryGetable;
pub use types::ValueType;

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A single typed database value, possibly null.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(Option<bool>),
    TinyInt(Option<i8>),
    SmallInt(Option<i16>),
    Int(Option<i32>),
    BigInt(Option<i64>),
    Float(Option<f32>),
    Double(Option<f64>),
    Decimal(Option<Decimal>),
    String(Option<String>),
    Bytes(Option<Vec<u8>>),
    Uuid(Option<Uuid>),
    Date(Option<NaiveDate>),
    Time(Option<NaiveTime>),
    DateTime(Option<NaiveDateTime>),
    TimestampTz(Option<DateTime<Utc>>),
    Json(Option<serde_json::Value>),
}

impl Value {
    /// Whether this value is a (typed) SQL null.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Bool(v) => v.is_none(),
            Value::TinyInt(v) => v.is_none(),
            Value::SmallInt(v) => v.is_none(),
            Value::Int(v) => v.is_none(),
            Value::BigInt(v) => v.is_none(),
            Value::Float(v) => v.is_none(),
            Value::Double(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::String(v) => v.is_none(),
            Value::Bytes(v) => v.is_none(),
            Value::Uuid(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::DateTime(v) => v.is_none(),
            Value::TimestampTz(v) => v.is_none(),
            Value::Json(v) => v.is_none(),
        }
    }

    /// The variant name, used in diagnostics and conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::TinyInt(_) => "TinyInt",
            Value::SmallInt(_) => "SmallInt",
            Value::Int(_) => "Int",
            Value::BigInt(_) => "BigInt",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Decimal(_) => "Decimal",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Uuid(_) => "Uuid",
            Value::Date(_) => "Date",
            Value::Time(_) => "Time",
            Value::DateTime(_) => "DateTime",
            Value::TimestampTz(_) => "TimestampTz",
            Value::Json(_) => "Json",
        }
    }

    /// Read the value as an `i64` where the variant permits it. Used by the
    /// count path, where different drivers report different integer widths.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::TinyInt(Some(v)) => Some(i64::from(*v)),
            Value::SmallInt(Some(v)) => Some(i64::from(*v)),
            Value::Int(Some(v)) => Some(i64::from(*v)),
            Value::BigInt(Some(v)) => Some(*v),
            Value::Decimal(Some(v)) => {
                use rust_decimal::prelude::ToPrimitive;
                v.to_i64()
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "NULL");
        }
        match self {
            Value::Bool(Some(v)) => write!(f, "{v}"),
            Value::TinyInt(Some(v)) => write!(f, "{v}"),
            Value::SmallInt(Some(v)) => write!(f, "{v}"),
            Value::Int(Some(v)) => write!(f, "{v}"),
            Value::BigInt(Some(v)) => write!(f, "{v}"),
            Value::Float(Some(v)) => write!(f, "{v}"),
            Value::Double(Some(v)) => write!(f, "{v}"),
            Value::Decimal(Some(v)) => write!(f, "{v}"),
            Value::String(Some(v)) => write!(f, "'{v}'"),
            Value::Bytes(Some(v)) => write!(f, "<{} bytes>", v.len()),
            Value::Uuid(Some(v)) => write!(f, "'{v}'"),
            Value::Date(Some(v)) => write!(f, "'{v}'"),
            Value::Time(Some(v)) => write!(f, "'{v}'"),
            Value::DateTime(Some(v)) => write!(f, "'{v}'"),
            Value::TimestampTz(Some(v)) => write!(f, "'{v}'"),
            Value::Json(Some(v)) => write!(f, "{v}"),
            _ => unreachable!("null handled above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_nulls_keep_their_type() {
        assert!(Value::Int(None).is_null());
        assert!(Value::String(None).is_null());
        assert_eq!(Value::Int(None).type_name(), "Int");
        assert_ne!(Value::Int(None), Value::BigInt(None));
    }

    #[test]
    fn test_as_i64_widens_integers() {
        assert_eq!(Value::TinyInt(Some(3)).as_i64(), Some(3));
        assert_eq!(Value::Int(Some(95)).as_i64(), Some(95));
        assert_eq!(Value::BigInt(Some(503)).as_i64(), Some(503));
        assert_eq!(Value::String(Some("95".into())).as_i64(), None);
    }

    #[test]
    fn test_display_renders_null_and_strings() {
        assert_eq!(Value::Int(None).to_string(), "NULL");
        assert_eq!(Value::String(Some("ada".into())).to_string(), "'ada'");
        assert_eq!(Value::BigInt(Some(42)).to_string(), "42");
    }
}
