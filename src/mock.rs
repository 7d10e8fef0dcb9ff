//! Scripted in-memory driver for tests.
//!
//! `MockDb` is both the [`ConnectionProvider`] and the shared script: tests
//! queue result sets and execution outcomes up front, run the code under
//! test, then assert on the statements the engine actually issued and on the
//! lifecycle counters. All connections handed out share one script, so a test
//! sees one global statement order regardless of how many contexts it opens.

use std::sync::{Arc, Mutex};

use crate::connection::{
    Connection, ConnectionProvider, ExecResult, IsolationLevel, StatementOptions,
};
use crate::error::DbError;
use crate::row::Row;
use crate::value::Value;

/// One statement the engine issued, as the driver saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Query {
        sql: String,
        params: Vec<Value>,
    },
    Execute {
        sql: String,
        params: Vec<Value>,
    },
    Batch {
        sql: String,
        rows: Vec<Vec<Value>>,
    },
}

impl Statement {
    pub fn sql(&self) -> &str {
        match self {
            Statement::Query { sql, .. }
            | Statement::Execute { sql, .. }
            | Statement::Batch { sql, .. } => sql,
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    queued_rows: Vec<Vec<Row>>,
    queued_execs: Vec<Result<u64, String>>,
    statements: Vec<Statement>,
    next_key: i64,
    opened: usize,
    closed: usize,
    begun: usize,
    committed: usize,
    rolled_back: usize,
}

/// Shared scripted driver.
#[derive(Clone, Default)]
pub struct MockDb {
    script: Arc<Mutex<Script>>,
}

impl MockDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows the next query will return.
    pub fn push_rows(&self, rows: Vec<Row>) {
        self.lock().queued_rows.push(rows);
    }

    /// Queue the affected-row count of the next write.
    pub fn push_affected(&self, affected: u64) {
        self.lock().queued_execs.push(Ok(affected));
    }

    /// Queue a failure for the next write.
    pub fn push_error(&self, message: &str) {
        self.lock().queued_execs.push(Err(message.to_string()));
    }

    /// Every statement issued so far, in order.
    pub fn statements(&self) -> Vec<Statement> {
        self.lock().statements.clone()
    }

    pub fn statement_count(&self) -> usize {
        self.lock().statements.len()
    }

    pub fn opened(&self) -> usize {
        self.lock().opened
    }

    pub fn closed(&self) -> usize {
        self.lock().closed
    }

    pub fn begun(&self) -> usize {
        self.lock().begun
    }

    pub fn committed(&self) -> usize {
        self.lock().committed
    }

    pub fn rolled_back(&self) -> usize {
        self.lock().rolled_back
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ConnectionProvider for MockDb {
    fn acquire(&self) -> Result<Box<dyn Connection>, DbError> {
        self.lock().opened += 1;
        Ok(Box::new(MockConnection {
            script: Arc::clone(&self.script),
        }))
    }
}

struct MockConnection {
    script: Arc<Mutex<Script>>,
}

impl MockConnection {
    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Connection for MockConnection {
    fn configure(&mut self, _options: StatementOptions) {}

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>, DbError> {
        let mut script = self.lock();
        script.statements.push(Statement::Query {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        if script.queued_rows.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(script.queued_rows.remove(0))
        }
    }

    fn execute(
        &mut self,
        sql: &str,
        params: &[Value],
        return_generated_keys: bool,
    ) -> Result<ExecResult, DbError> {
        let mut script = self.lock();
        script.statements.push(Statement::Execute {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        let affected = take_exec(&mut script, 1)?;
        let generated_keys = if return_generated_keys {
            script.next_key += 1;
            vec![Value::BigInt(Some(script.next_key))]
        } else {
            Vec::new()
        };
        Ok(ExecResult {
            affected_rows: affected,
            generated_keys,
        })
    }

    fn execute_batch(
        &mut self,
        sql: &str,
        rows: &[Vec<Value>],
        return_generated_keys: bool,
    ) -> Result<ExecResult, DbError> {
        let sent = rows.len() as u64;
        let mut script = self.lock();
        script.statements.push(Statement::Batch {
            sql: sql.to_string(),
            rows: rows.to_vec(),
        });
        let affected = take_exec(&mut script, sent)?;
        let generated_keys = if return_generated_keys {
            (0..rows.len())
                .map(|_| {
                    script.next_key += 1;
                    Value::BigInt(Some(script.next_key))
                })
                .collect()
        } else {
            Vec::new()
        };
        Ok(ExecResult {
            affected_rows: affected,
            generated_keys,
        })
    }

    fn begin(&mut self, _isolation: IsolationLevel) -> Result<(), DbError> {
        self.lock().begun += 1;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DbError> {
        self.lock().committed += 1;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), DbError> {
        self.lock().rolled_back += 1;
        Ok(())
    }
}

impl Drop for MockConnection {
    fn drop(&mut self) {
        self.lock().closed += 1;
    }
}

// Unqueued writes default to reporting every sent row as affected.
fn take_exec(script: &mut Script, default: u64) -> Result<u64, DbError> {
    if script.queued_execs.is_empty() {
        return Ok(default);
    }
    match script.queued_execs.remove(0) {
        Ok(affected) => Ok(affected),
        Err(message) => Err(DbError::execution(message)),
    }
}
