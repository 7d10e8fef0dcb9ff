//! Primary-key generation strategies.
//!
//! The strategy is declared per entity type and drives what the insert path
//! does with a null primary key: `Assigned` rejects it, `Identity` defers to
//! the database, `Uuid` and `SnowFlake` fill it in locally before the insert.

mod snowflake;

pub use snowflake::SnowflakeGenerator;

use serde::Deserialize;
use uuid::Uuid;

/// How a new row obtains its primary-key value.
///
/// The string forms (`assigned`, `identity`, `uuid`, `snow_flake`) are shared
/// vocabulary with the external code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationType {
    /// The caller sets the key itself; a null key at insert time is an error.
    Assigned,
    /// The database assigns the key; generated keys are read back after the
    /// insert and written into the in-memory entities.
    Identity,
    /// A random UUID string is assigned locally when the key is null.
    Uuid,
    /// A 64-bit snowflake id is assigned locally when the key is null.
    SnowFlake,
}

/// Generate a random UUID key as a 32-character lowercase hex string.
pub fn next_uuid() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_next_uuid_shape() {
        let id = next_uuid();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_next_uuid_unique() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(next_uuid()));
        }
    }

    #[test]
    fn test_generation_type_deserializes_generator_vocabulary() {
        let t: GenerationType = serde_json::from_str("\"snow_flake\"").unwrap();
        assert_eq!(t, GenerationType::SnowFlake);
        let t: GenerationType = serde_json::from_str("\"identity\"").unwrap();
        assert_eq!(t, GenerationType::Identity);
    }
}
