use super::{page_offset, Dialect};
use crate::clause::Sql;
use crate::value::Value;

/// Oracle, using the classic double-wrapped ROWNUM pagination that works on
/// every supported server version.
pub struct OracleDialect;

impl Dialect for OracleDialect {
    fn db_type(&self) -> &'static str {
        "oracle"
    }

    fn select_top(&self, current_page: i64, page_size: i64, sql: Sql) -> Sql {
        if page_size <= 0 {
            return sql;
        }
        let offset = page_offset(current_page, page_size);
        let (text, mut params) = sql.into_parts();
        params.push(Value::BigInt(Some(offset + page_size)));
        params.push(Value::BigInt(Some(offset)));
        Sql::with_params(
            format!(
                "SELECT * FROM (SELECT _inner.*, ROWNUM _rn FROM ({text}) _inner \
                 WHERE ROWNUM <= ?) WHERE _rn > ?"
            ),
            params,
        )
    }
}
