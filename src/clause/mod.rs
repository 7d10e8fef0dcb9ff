//! The fluent SQL and condition builders.
//!
//! [`Sql`] accumulates statement text plus ordered positional parameters;
//! [`Cond`] builds predicate trees that compile to a WHERE fragment plus
//! parameters. Placeholders are always `?`, in parameter order.

mod cond;
mod sql;

pub use cond::{Cond, ConditionField, ConditionSource};
pub use sql::Sql;
