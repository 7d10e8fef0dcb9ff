//! Condition fragments for `WHERE` clauses.

use crate::error::DbError;
use crate::value::Value;

/// One field contributed by a [`ConditionSource`]: the column it constrains,
/// an optional group tag for building partial conditions, and the value to
/// compare with.
#[derive(Debug, Clone)]
pub struct ConditionField {
    pub column: &'static str,
    pub group: Option<&'static str>,
    pub value: Value,
}

impl ConditionField {
    pub fn new(column: &'static str, value: impl Into<Value>) -> Self {
        Self {
            column,
            group: None,
            value: value.into(),
        }
    }

    pub fn grouped(column: &'static str, group: &'static str, value: impl Into<Value>) -> Self {
        Self {
            column,
            group: Some(group),
            value: value.into(),
        }
    }
}

/// A filter type that can be turned into equality conditions, one per field.
/// Null field values become `IS NULL` tests rather than being skipped.
pub trait ConditionSource {
    fn condition_fields(&self) -> Vec<ConditionField>;
}

/// An accumulated condition fragment plus its ordered parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cond {
    sql: String,
    params: Vec<Value>,
}

impl Cond {
    /// An arbitrary fragment with its parameters.
    pub fn raw(fragment: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: fragment.into(),
            params,
        }
    }

    /// `{column} = ?`, or `{column} IS NULL` when the value is null.
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if value.is_null() {
            Self::raw(format!("{column} IS NULL"), Vec::new())
        } else {
            Self::raw(format!("{column} = ?"), vec![value])
        }
    }

    /// `{column} <> ?`.
    pub fn ne(column: &str, value: impl Into<Value>) -> Self {
        Self::compare(column, "<>", value.into())
    }

    /// `{column} > ?`.
    pub fn gt(column: &str, value: impl Into<Value>) -> Self {
        Self::compare(column, ">", value.into())
    }

    /// `{column} >= ?`.
    pub fn ge(column: &str, value: impl Into<Value>) -> Self {
        Self::compare(column, ">=", value.into())
    }

    /// `{column} < ?`.
    pub fn lt(column: &str, value: impl Into<Value>) -> Self {
        Self::compare(column, "<", value.into())
    }

    /// `{column} <= ?`.
    pub fn le(column: &str, value: impl Into<Value>) -> Self {
        Self::compare(column, "<=", value.into())
    }

    /// `{column} LIKE ?`.
    pub fn like(column: &str, pattern: impl Into<Value>) -> Self {
        Self::compare(column, "LIKE", pattern.into())
    }

    pub fn is_null(column: &str) -> Self {
        Self::raw(format!("{column} IS NULL"), Vec::new())
    }

    pub fn is_not_null(column: &str) -> Self {
        Self::raw(format!("{column} IS NOT NULL"), Vec::new())
    }

    /// `{column} IN (?, ?, ...)`.
    ///
    /// An empty value list is rejected unless `allow_empty` is set, in which
    /// case the condition degrades to the always-true `1 = 1` so callers can
    /// mean "no restriction".
    pub fn is_in<T: Into<Value>>(
        column: &str,
        values: Vec<T>,
        allow_empty: bool,
    ) -> Result<Self, DbError> {
        if values.is_empty() {
            if allow_empty {
                return Ok(Self::raw("1 = 1", Vec::new()));
            }
            return Err(DbError::InvalidCondition(format!(
                "IN condition on column {column} has no values"
            )));
        }
        let placeholders = vec!["?"; values.len()].join(", ");
        let params = values.into_iter().map(Into::into).collect();
        Ok(Self::raw(format!("{column} IN ({placeholders})"), params))
    }

    /// Join with `AND`.
    pub fn and(mut self, other: Cond) -> Self {
        self.join("AND", other);
        self
    }

    /// Join with `OR`, parenthesizing the right-hand side.
    pub fn or(mut self, other: Cond) -> Self {
        if self.sql.is_empty() {
            return other;
        }
        if other.sql.is_empty() {
            return self;
        }
        self.sql = format!("({}) OR ({})", self.sql, other.sql);
        self.params.extend(other.params);
        self
    }

    /// Build an AND-joined equality condition from a filter source.
    ///
    /// Only non-null fields contribute, in declaration order. `group` selects
    /// which fields participate: `None` takes the ungrouped fields, `Some`
    /// takes the fields declared under that group.
    pub fn create(source: &dyn ConditionSource, group: Option<&str>) -> Self {
        let mut cond = Cond::default();
        for field in source.condition_fields() {
            if field.group.as_deref() != group {
                continue;
            }
            if field.value.is_null() {
                continue;
            }
            cond = cond.and(Cond::eq(field.column, field.value));
        }
        cond
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    fn compare(column: &str, op: &str, value: Value) -> Self {
        Self::raw(format!("{column} {op} ?"), vec![value])
    }

    fn join(&mut self, connector: &str, other: Cond) {
        if other.sql.is_empty() {
            return;
        }
        if self.sql.is_empty() {
            *self = other;
            return;
        }
        self.sql.push(' ');
        self.sql.push_str(connector);
        self.sql.push(' ');
        self.sql.push_str(&other.sql);
        self.params.extend(other.params);
    }
}
