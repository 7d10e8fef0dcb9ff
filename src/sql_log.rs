//! Framed debug logging of statements and results.

use crate::row::Row;
use crate::value::Value;

const FRAME: &str = "--------------------------------------------------------------";

/// Statement/result logger, gated by configuration so disabled logging costs
/// one branch per call.
#[derive(Debug, Clone, Copy)]
pub struct SqlLog {
    show_sql: bool,
    show_result: bool,
}

impl SqlLog {
    pub fn new(show_sql: bool, show_result: bool) -> Self {
        Self {
            show_sql,
            show_result,
        }
    }

    pub fn show_sql(&self, sql: &str, params: &[Value]) {
        if !self.show_sql {
            return;
        }
        log::debug!("{FRAME}");
        log::debug!("SQL: {sql}");
        log::debug!("PARAMETERS: {}", format_params(params));
        log::debug!("{FRAME}");
    }

    pub fn show_batch_sql(&self, sql: &str, rows: &[Vec<Value>]) {
        if !self.show_sql {
            return;
        }
        log::debug!("{FRAME}");
        log::debug!("BATCH SQL: {sql}");
        log::debug!("BATCH SIZE: {}", rows.len());
        for row in rows {
            log::debug!("PARAMETERS: {}", format_params(row));
        }
        log::debug!("{FRAME}");
    }

    pub fn show_affected_rows(&self, affected: u64) {
        if self.show_result {
            log::debug!("AFFECTED ROWS: {affected}");
        }
    }

    pub fn show_rows(&self, rows: &[Row], elapsed_millis: u128) {
        if !self.show_result {
            return;
        }
        log::debug!("{FRAME}");
        for row in rows {
            let rendered = row
                .iter()
                .map(|(column, value)| format!("{column}: {value}"))
                .collect::<Vec<_>>()
                .join(", ");
            log::debug!("RESULT: {rendered}");
        }
        log::debug!("TOTAL RECORDS: {} ({elapsed_millis} ms)", rows.len());
        log::debug!("{FRAME}");
    }
}

fn format_params(params: &[Value]) -> String {
    params
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_params_renders_nulls_and_strings() {
        let params = vec![Value::Int(Some(7)), Value::String(None), "cat".into()];
        assert_eq!(format_params(&params), "7, NULL, 'cat'");
    }
}
