use super::{page_offset, Dialect};
use crate::clause::Sql;
use crate::value::Value;

/// Microsoft SQL Server (2012+, OFFSET/FETCH pagination).
///
/// OFFSET/FETCH attaches to the statement's own ORDER BY, so the page window
/// is appended to the caller's statement rather than wrapped around it; a
/// derived table carrying an inner ORDER BY would be rejected by the server.
pub struct SqlServerDialect;

impl Dialect for SqlServerDialect {
    fn db_type(&self) -> &'static str {
        "sqlserver"
    }

    fn select_top(&self, current_page: i64, page_size: i64, sql: Sql) -> Sql {
        if page_size <= 0 {
            return sql;
        }
        let offset = page_offset(current_page, page_size);
        // OFFSET requires an ORDER BY; give unordered statements a neutral one.
        let sql = if top_level_order_by(sql.sql()).is_none() {
            sql.append("ORDER BY (SELECT NULL)")
        } else {
            sql
        };
        sql.append_with(
            "OFFSET ? ROWS FETCH NEXT ? ROWS ONLY",
            vec![Value::BigInt(Some(offset)), Value::BigInt(Some(page_size))],
        )
    }

    fn count(&self, sql: Sql) -> Sql {
        let (text, mut params) = sql.into_parts();
        // ORDER BY is irrelevant to the count and invalid inside the derived
        // table on this vendor, so the clause (and its parameters) go.
        let text = match top_level_order_by(&text) {
            Some(pos) => {
                let dropped = text[pos..].matches('?').count();
                params.truncate(params.len().saturating_sub(dropped));
                text[..pos].trim_end().to_string()
            }
            None => text,
        };
        Sql::with_params(format!("SELECT COUNT(*) FROM ({text}) _count"), params)
    }
}

/// Byte offset of the last ORDER BY outside any parentheses, if present.
fn top_level_order_by(sql: &str) -> Option<usize> {
    let lower = sql.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut depth = 0usize;
    let mut found = None;
    for i in 0..bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            _ => {
                if depth == 0
                    && bytes[i..].starts_with(b"order by")
                    && (i == 0 || !bytes[i - 1].is_ascii_alphanumeric())
                {
                    found = Some(i);
                }
            }
        }
    }
    found
}
