//! Result rows and the open-ended [`Record`] type.

use std::fmt;

use crate::error::DbError;
use crate::value::{TryGetable, Value};

/// One row of a query result: ordered column names paired with values.
///
/// Drivers produce rows; [`FromRow`] implementations consume them. Column
/// lookup is by case-insensitive name, matching how relational drivers report
/// result-set labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Build a row from parallel column and value lists.
    ///
    /// The lists must be the same length; drivers construct these from the
    /// result-set metadata so the invariant holds by construction.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Build a row from `(column, value)` pairs. Mostly used by tests and the
    /// mock driver.
    pub fn from_pairs(pairs: Vec<(&str, Value)>) -> Self {
        let (columns, values) = pairs
            .into_iter()
            .map(|(c, v)| (c.to_owned(), v))
            .unzip();
        Self { columns, values }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Look up a column value by name, case-insensitively.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
            .map(|i| &self.values[i])
    }

    /// The value at a positional index.
    pub fn get_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Extract a typed, non-null value from a named column.
    pub fn try_get<T: TryGetable>(&self, column: &str) -> Result<T, DbError> {
        let value = self
            .get(column)
            .ok_or_else(|| DbError::Mapping(format!("result set has no column '{column}'")))?;
        T::try_get(value.clone())
    }

    /// Extract a typed value from a named column, mapping SQL null to `None`.
    pub fn try_get_opt<T: TryGetable>(&self, column: &str) -> Result<Option<T>, DbError> {
        match self.get(column) {
            Some(value) => T::try_get_opt(value.clone()),
            None => Ok(None),
        }
    }

    /// Iterate `(column, value)` pairs in result order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

/// Converts a result [`Row`] into a typed instance.
///
/// Entity types implement this through [`crate::entity::from_row`]; `Record`
/// implements it by copying every column.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, DbError>;
}

// Rows pass through untouched, so ad-hoc queries can be paged without a
// declared result type.
impl FromRow for Row {
    fn from_row(row: &Row) -> Result<Self, DbError> {
        Ok(row.clone())
    }
}

/// An open-ended name→value record for ad-hoc SQL whose output shape is not a
/// declared entity type. Preserves result-set column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by column name, case-insensitively.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(column))
            .map(|(_, v)| v)
    }

    /// Extract a typed, non-null value by column name.
    pub fn try_get<T: TryGetable>(&self, column: &str) -> Result<T, DbError> {
        let value = self
            .get(column)
            .ok_or_else(|| DbError::Mapping(format!("record has no column '{column}'")))?;
        T::try_get(value.clone())
    }

    /// Append a column. Later lookups see the first occurrence of a name.
    pub fn put(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((column.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }
}

impl FromRow for Record {
    fn from_row(row: &Row) -> Result<Self, DbError> {
        let mut record = Record::new();
        for (column, value) in row.iter() {
            record.entries.push((column.to_owned(), value.clone()));
        }
        Ok(record)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, (column, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{column} = {value}")?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row::from_pairs(vec![
            ("id", Value::BigInt(Some(7))),
            ("name", Value::String(Some("ada".into()))),
            ("disabled", Value::Bool(None)),
        ])
    }

    #[test]
    fn test_row_lookup_is_case_insensitive() {
        let row = sample_row();
        assert_eq!(row.try_get::<i64>("ID").unwrap(), 7);
        assert_eq!(row.try_get::<String>("name").unwrap(), "ada");
    }

    #[test]
    fn test_row_missing_column_is_mapping_error() {
        let err = sample_row().try_get::<i64>("missing").unwrap_err();
        assert!(matches!(err, DbError::Mapping(_)));
    }

    #[test]
    fn test_row_try_get_opt_handles_null_and_missing() {
        let row = sample_row();
        assert_eq!(row.try_get_opt::<bool>("disabled").unwrap(), None);
        assert_eq!(row.try_get_opt::<i64>("missing").unwrap(), None);
    }

    #[test]
    fn test_record_copies_every_column_in_order() {
        let record = Record::from_row(&sample_row()).unwrap();
        assert_eq!(record.len(), 3);
        let columns: Vec<&str> = record.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, vec!["id", "name", "disabled"]);
        assert_eq!(record.try_get::<i64>("id").unwrap(), 7);
    }

    #[test]
    fn test_record_display() {
        let mut record = Record::new();
        record.put("id", 1i64);
        record.put("name", "ada");
        assert_eq!(record.to_string(), "{ id = 1, name = 'ada' }");
    }
}
