//! `TryGetable`: the extract half of the per-type converter table.
//!
//! Checked extraction from a [`Value`] into a Rust field type. A variant
//! mismatch surfaces as [`DbError::UnsupportedType`] naming both sides, which
//! is enough to diagnose a bad mapping without re-running with diagnostics on.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{Value, ValueType};
use crate::error::DbError;

/// Checked extraction of a Rust value out of a [`Value`].
pub trait TryGetable: ValueType {
    /// Extract a non-null value, failing on null or variant mismatch.
    fn try_get(value: Value) -> Result<Self, DbError>;

    /// Extract an optional value; a typed null becomes `None`.
    fn try_get_opt(value: Value) -> Result<Option<Self>, DbError> {
        if value.is_null() {
            return Ok(None);
        }
        Self::try_get(value).map(Some)
    }
}

fn mismatch(expected: &str, actual: &Value) -> DbError {
    DbError::UnsupportedType(format!(
        "cannot extract {expected} from {} value",
        actual.type_name()
    ))
}

fn null_error(expected: &str) -> DbError {
    DbError::UnsupportedType(format!("null value where non-null {expected} was required"))
}

macro_rules! impl_try_getable {
    ($type:ty, $variant:ident, $expected:expr) => {
        impl TryGetable for $type {
            fn try_get(value: Value) -> Result<Self, DbError> {
                match value {
                    Value::$variant(Some(v)) => Ok(v),
                    Value::$variant(None) => Err(null_error($expected)),
                    other => Err(mismatch($expected, &other)),
                }
            }
        }
    };
}

impl_try_getable!(bool, Bool, "bool");
impl_try_getable!(i8, TinyInt, "i8");
impl_try_getable!(f32, Float, "f32");
impl_try_getable!(Decimal, Decimal, "Decimal");
impl_try_getable!(String, String, "String");
impl_try_getable!(Vec<u8>, Bytes, "Vec<u8>");
impl_try_getable!(Uuid, Uuid, "Uuid");
impl_try_getable!(NaiveDate, Date, "NaiveDate");
impl_try_getable!(NaiveTime, Time, "NaiveTime");
impl_try_getable!(NaiveDateTime, DateTime, "NaiveDateTime");
impl_try_getable!(DateTime<Utc>, TimestampTz, "DateTime<Utc>");
impl_try_getable!(serde_json::Value, Json, "Json");

// Integer extraction accepts narrower variants, and `i16`/`i32` additionally
// accept in-range wider ones. Drivers do not agree on the width of generated
// keys and COUNT(*) results, so exact-variant matching would be too brittle.

impl TryGetable for i16 {
    fn try_get(value: Value) -> Result<Self, DbError> {
        match value {
            Value::SmallInt(Some(v)) => Ok(v),
            Value::TinyInt(Some(v)) => Ok(i16::from(v)),
            Value::Int(Some(v)) => {
                i16::try_from(v).map_err(|_| mismatch("i16", &Value::Int(Some(v))))
            }
            Value::BigInt(Some(v)) => {
                i16::try_from(v).map_err(|_| mismatch("i16", &Value::BigInt(Some(v))))
            }
            v if v.is_null() => Err(null_error("i16")),
            other => Err(mismatch("i16", &other)),
        }
    }
}

impl TryGetable for i32 {
    fn try_get(value: Value) -> Result<Self, DbError> {
        match value {
            Value::Int(Some(v)) => Ok(v),
            Value::TinyInt(Some(v)) => Ok(i32::from(v)),
            Value::SmallInt(Some(v)) => Ok(i32::from(v)),
            Value::BigInt(Some(v)) => {
                i32::try_from(v).map_err(|_| mismatch("i32", &Value::BigInt(Some(v))))
            }
            v if v.is_null() => Err(null_error("i32")),
            other => Err(mismatch("i32", &other)),
        }
    }
}

impl TryGetable for i64 {
    fn try_get(value: Value) -> Result<Self, DbError> {
        match value {
            Value::BigInt(Some(v)) => Ok(v),
            Value::TinyInt(Some(v)) => Ok(i64::from(v)),
            Value::SmallInt(Some(v)) => Ok(i64::from(v)),
            Value::Int(Some(v)) => Ok(i64::from(v)),
            v if v.is_null() => Err(null_error("i64")),
            other => Err(mismatch("i64", &other)),
        }
    }
}

impl TryGetable for f64 {
    fn try_get(value: Value) -> Result<Self, DbError> {
        match value {
            Value::Double(Some(v)) => Ok(v),
            Value::Float(Some(v)) => Ok(f64::from(v)),
            v if v.is_null() => Err(null_error("f64")),
            other => Err(mismatch("f64", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_get_exact_variant() {
        assert_eq!(String::try_get(Value::String(Some("ok".into()))).unwrap(), "ok");
        assert_eq!(i64::try_get(Value::BigInt(Some(9))).unwrap(), 9);
        assert!(bool::try_get(Value::Bool(Some(true))).unwrap());
    }

    #[test]
    fn test_try_get_widens_integers() {
        assert_eq!(i64::try_get(Value::Int(Some(5))).unwrap(), 5);
        assert_eq!(i32::try_get(Value::BigInt(Some(5))).unwrap(), 5);
    }

    #[test]
    fn test_try_get_rejects_out_of_range() {
        let err = i32::try_get(Value::BigInt(Some(i64::MAX))).unwrap_err();
        assert!(matches!(err, DbError::UnsupportedType(_)));
    }

    #[test]
    fn test_try_get_rejects_mismatch() {
        let err = i64::try_get(Value::String(Some("5".into()))).unwrap_err();
        assert!(err.to_string().contains("String"));
    }

    #[test]
    fn test_try_get_opt_maps_null_to_none() {
        assert_eq!(i64::try_get_opt(Value::BigInt(None)).unwrap(), None);
        assert_eq!(i64::try_get_opt(Value::BigInt(Some(1))).unwrap(), Some(1));
        assert!(i64::try_get(Value::BigInt(None)).is_err());
    }
}
