//! The mapping contract between user record types and the engine.
//!
//! An entity type declares its table name, primary-key generation strategy,
//! and a static list of field↔column pairings, plus a field accessor table
//! (`get`/`set` by field name). This is the whole contract: the registry reads
//! it once per type and never again, and there is no runtime reflection.
//!
//! Implementations are mechanical and normally emitted by the external code
//! generator; see `tests_cfg` for hand-written examples.

use crate::error::DbError;
use crate::pk::GenerationType;
use crate::row::Row;
use crate::value::Value;

/// One field↔column pairing. Immutable, declared as a `'static` descriptor on
/// the entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    /// Rust field name, used by the accessor table.
    pub field: &'static str,
    /// Database column name.
    pub column: &'static str,
    /// Whether this attribute is the primary key.
    pub primary_key: bool,
}

impl Attribute {
    /// A plain mapped column.
    pub const fn new(field: &'static str, column: &'static str) -> Self {
        Self {
            field,
            column,
            primary_key: false,
        }
    }

    /// The primary-key column.
    pub const fn primary_key(field: &'static str, column: &'static str) -> Self {
        Self {
            field,
            column,
            primary_key: true,
        }
    }
}

/// A mapped record type.
///
/// `get` and `set` form the per-type accessor table: the engine only ever
/// passes field names taken from [`Entity::attributes`], and `get` returns
/// `None` / `set` fails with a mapping error for anything else.
pub trait Entity: Clone + Default + 'static {
    fn table_name() -> &'static str;

    fn strategy() -> GenerationType;

    fn attributes() -> &'static [Attribute];

    /// Read a field as a [`Value`]. `None` means the field name is unknown.
    fn get(&self, field: &str) -> Option<Value>;

    /// Write a field from a [`Value`].
    fn set(&mut self, field: &str, value: Value) -> Result<(), DbError>;
}

/// Build a fresh entity from a result row.
///
/// Every mapped column present in the row is copied through the accessor
/// table; missing result columns leave the corresponding field at its default.
pub fn from_row<T: Entity>(row: &Row) -> Result<T, DbError> {
    let mut entity = T::default();
    for attribute in T::attributes() {
        if let Some(value) = row.get(attribute.column) {
            entity.set(attribute.field, value.clone())?;
        }
    }
    Ok(entity)
}

/// Read a field through the accessor table, failing with a mapping error when
/// the entity does not know the field.
pub(crate) fn field_value<T: Entity>(entity: &T, field: &str) -> Result<Value, DbError> {
    entity.get(field).ok_or_else(|| {
        DbError::Mapping(format!(
            "{} has no field '{field}'",
            std::any::type_name::<T>()
        ))
    })
}
