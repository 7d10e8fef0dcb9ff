//! `ValueType`: the bind half of the per-type converter table.
//!
//! Each supported Rust field type knows which [`Value`] variant it maps to and
//! what its typed null looks like. `Option<T>` forwards to `T` and uses the
//! typed null for `None`, so a null parameter is always bound as the native
//! SQL null of the column's type rather than a generic null.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::Value;

/// Maps a Rust type to its [`Value`] variant.
pub trait ValueType: Sized {
    /// Convert this value into a [`Value`].
    fn into_value(self) -> Value;

    /// The typed null for this type.
    fn null_value() -> Value;
}

macro_rules! impl_value_type {
    ($type:ty, $variant:ident) => {
        impl ValueType for $type {
            fn into_value(self) -> Value {
                Value::$variant(Some(self))
            }

            fn null_value() -> Value {
                Value::$variant(None)
            }
        }
    };
}

impl_value_type!(bool, Bool);
impl_value_type!(i8, TinyInt);
impl_value_type!(i16, SmallInt);
impl_value_type!(i32, Int);
impl_value_type!(i64, BigInt);
impl_value_type!(f32, Float);
impl_value_type!(f64, Double);
impl_value_type!(Decimal, Decimal);
impl_value_type!(String, String);
impl_value_type!(Vec<u8>, Bytes);
impl_value_type!(Uuid, Uuid);
impl_value_type!(NaiveDate, Date);
impl_value_type!(NaiveTime, Time);
impl_value_type!(NaiveDateTime, DateTime);
impl_value_type!(DateTime<Utc>, TimestampTz);
impl_value_type!(serde_json::Value, Json);

impl ValueType for &str {
    fn into_value(self) -> Value {
        Value::String(Some(self.to_owned()))
    }

    fn null_value() -> Value {
        Value::String(None)
    }
}

impl<T: ValueType> ValueType for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => T::null_value(),
        }
    }

    fn null_value() -> Value {
        T::null_value()
    }
}

impl<T: ValueType> From<T> for Value {
    fn from(v: T) -> Self {
        v.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_value_primitives() {
        assert_eq!(42i32.into_value(), Value::Int(Some(42)));
        assert_eq!(true.into_value(), Value::Bool(Some(true)));
        assert_eq!("ada".into_value(), Value::String(Some("ada".into())));
    }

    #[test]
    fn test_option_maps_none_to_typed_null() {
        assert_eq!(None::<i64>.into_value(), Value::BigInt(None));
        assert_eq!(Some(7i64).into_value(), Value::BigInt(Some(7)));
        assert_eq!(None::<String>.into_value(), Value::String(None));
    }

    #[test]
    fn test_from_impl_converts() {
        let v: Value = 3.5f64.into();
        assert_eq!(v, Value::Double(Some(3.5)));
    }
}
