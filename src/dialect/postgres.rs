use super::{page_offset, Dialect};
use crate::clause::Sql;
use crate::value::Value;

/// PostgreSQL.
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn db_type(&self) -> &'static str {
        "postgresql"
    }

    fn select_top(&self, current_page: i64, page_size: i64, sql: Sql) -> Sql {
        if page_size <= 0 {
            return sql;
        }
        let offset = page_offset(current_page, page_size);
        sql.append_with(
            "LIMIT ? OFFSET ?",
            vec![Value::BigInt(Some(page_size)), Value::BigInt(Some(offset))],
        )
    }
}
