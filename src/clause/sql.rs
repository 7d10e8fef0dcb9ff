//! The `Sql` statement builder.

use std::fmt;

use super::Cond;
use crate::value::Value;

/// A SQL statement under construction: accumulated text plus the ordered list
/// of bound parameter values.
///
/// Parameters are positional: they must be appended in the same order as
/// their `?` placeholders appear in the text. Once handed to the execution
/// engine the statement is treated as read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sql {
    sql: String,
    params: Vec<Value>,
}

impl Sql {
    /// Start from an arbitrary fragment with no parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Start from a fragment with its parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// `SELECT * FROM {table}`.
    pub fn select(table: &str) -> Self {
        Self::new(format!("SELECT * FROM {table}"))
    }

    /// `UPDATE {table}`.
    pub fn update(table: &str) -> Self {
        Self::new(format!("UPDATE {table}"))
    }

    /// `DELETE FROM {table}`.
    pub fn delete(table: &str) -> Self {
        Self::new(format!("DELETE FROM {table}"))
    }

    /// Append a fragment, separated by one space.
    pub fn append(mut self, fragment: &str) -> Self {
        self.push_fragment(fragment);
        self
    }

    /// Append a fragment together with its parameters.
    pub fn append_with(mut self, fragment: &str, params: Vec<Value>) -> Self {
        self.push_fragment(fragment);
        self.params.extend(params);
        self
    }

    /// Append another statement's text and parameters.
    pub fn append_sql(mut self, other: Sql) -> Self {
        self.push_fragment(&other.sql);
        self.params.extend(other.params);
        self
    }

    /// Append ` WHERE {condition}`.
    pub fn where_cond(mut self, cond: Cond) -> Self {
        let (fragment, params) = cond.into_parts();
        self.push_fragment("WHERE");
        self.push_fragment(&fragment);
        self.params.extend(params);
        self
    }

    /// The finished statement text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The ordered bound parameters.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    fn push_fragment(&mut self, fragment: &str) {
        if !self.sql.is_empty() && !self.sql.ends_with(' ') && !fragment.starts_with(' ') {
            self.sql.push(' ');
        }
        self.sql.push_str(fragment);
    }
}

impl fmt::Display for Sql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql)
    }
}
