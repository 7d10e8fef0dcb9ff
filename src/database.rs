//! The execution engine: shared template plus scoped execution contexts.
//!
//! [`DbTemplate`] holds everything resolved once per deployment: the
//! configuration, the dialect, the key generators, and the connection source.
//! Each unit of work runs inside a [`Database`] context that owns exactly one
//! connection for its lifetime. Contexts are cheap to open and are closed by
//! `commit`/`rollback`/`close`, or by drop as a last resort.

use std::sync::Arc;
use std::time::Instant;

use crate::clause::{Cond, ConditionSource, Sql};
use crate::config::DbConfig;
use crate::connection::{
    Connection, ConnectionProvider, ExecResult, IsolationLevel, StatementOptions,
};
use crate::dialect::{self, Dialect};
use crate::entity::{self, Entity};
use crate::error::DbError;
use crate::metadata::{self, EntityMeta};
use crate::page::{Page, PageLite, Pageable};
use crate::pk::{self, GenerationType, SnowflakeGenerator};
use crate::row::{FromRow, Row};
use crate::sql_log::SqlLog;
use crate::value::Value;

struct TemplateInner {
    config: DbConfig,
    provider: Box<dyn ConnectionProvider>,
    dialect: &'static dyn Dialect,
    snowflake: SnowflakeGenerator,
    sql_log: SqlLog,
}

/// Shared entry point, cloneable and safe to hand to many threads. Resolves
/// the dialect and builds the snowflake generator once, at construction.
#[derive(Clone)]
pub struct DbTemplate {
    inner: Arc<TemplateInner>,
}

impl DbTemplate {
    pub fn new(
        config: DbConfig,
        provider: Box<dyn ConnectionProvider>,
    ) -> Result<Self, DbError> {
        let dialect = dialect::of(&config.db_type)?;
        let snowflake = SnowflakeGenerator::new(config.data_center_id, config.worker_id)?;
        let sql_log = SqlLog::new(config.show_sql, config.show_result);
        Ok(Self {
            inner: Arc::new(TemplateInner {
                config,
                provider,
                dialect,
                snowflake,
                sql_log,
            }),
        })
    }

    pub fn config(&self) -> &DbConfig {
        &self.inner.config
    }

    pub fn dialect(&self) -> &'static dyn Dialect {
        self.inner.dialect
    }

    /// Open a non-transactional execution context.
    pub fn open(&self) -> Result<Database, DbError> {
        self.context(None)
    }

    /// Open a context with a transaction at the configured default isolation.
    pub fn begin(&self) -> Result<Database, DbError> {
        self.context(Some(self.inner.config.default_isolation))
    }

    /// Open a context with a transaction at an explicit isolation level.
    pub fn begin_with_isolation(&self, isolation: IsolationLevel) -> Result<Database, DbError> {
        self.context(Some(isolation))
    }

    fn context(&self, isolation: Option<IsolationLevel>) -> Result<Database, DbError> {
        let mut conn = self.inner.provider.acquire()?;
        conn.configure(StatementOptions {
            fetch_size: self.inner.config.fetch_size,
            query_timeout_seconds: self.inner.config.query_timeout_seconds,
        });
        let in_transaction = if let Some(level) = isolation {
            conn.begin(level)?;
            true
        } else {
            false
        };
        Ok(Database {
            shared: Arc::clone(&self.inner),
            conn: Some(conn),
            in_transaction,
        })
    }
}

/// A scoped execution context over one connection.
///
/// Single-owner: every operation takes `&mut self`. The context is closed by
/// [`commit`](Database::commit), [`rollback`](Database::rollback) or
/// [`close`](Database::close); dropping an open context closes it, rolling
/// back any still-open transaction.
pub struct Database {
    shared: Arc<TemplateInner>,
    conn: Option<Box<dyn Connection>>,
    in_transaction: bool,
}

impl Database {
    // ---- reads ----------------------------------------------------------

    /// All rows of an ad-hoc query.
    pub fn find_rows(&mut self, sql: Sql) -> Result<Vec<Row>, DbError> {
        self.query_sql(sql)
    }

    /// Entities matching a condition.
    pub fn find<T: Entity + FromRow>(&mut self, cond: Cond) -> Result<Vec<T>, DbError> {
        let meta = metadata::of::<T>()?;
        let sql = self.entity_select(&meta, cond);
        self.find_with(sql)
    }

    /// Entities from an ad-hoc query.
    pub fn find_with<T: FromRow>(&mut self, sql: Sql) -> Result<Vec<T>, DbError> {
        let rows = self.query_sql(sql)?;
        rows.iter().map(T::from_row).collect()
    }

    /// At most `top` entities matching a condition.
    pub fn find_top<T: Entity + FromRow>(
        &mut self,
        top: i64,
        cond: Cond,
    ) -> Result<Vec<T>, DbError> {
        let meta = metadata::of::<T>()?;
        let sql = self.entity_select(&meta, cond);
        self.find_top_with(top, sql)
    }

    /// At most `top` entities from an ad-hoc query.
    pub fn find_top_with<T: FromRow>(&mut self, top: i64, sql: Sql) -> Result<Vec<T>, DbError> {
        let sql = self.shared.dialect.select_top(1, top, sql);
        self.find_with(sql)
    }

    /// Entities whose primary key is in `ids`. Empty input returns no rows
    /// without touching the driver.
    pub fn find_by_ids<T: Entity + FromRow, V: Into<Value>>(
        &mut self,
        ids: Vec<V>,
    ) -> Result<Vec<T>, DbError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let meta = metadata::of::<T>()?;
        let pk = meta.primary_key()?;
        let cond = Cond::is_in(pk.column, ids, false)?;
        let sql = self.entity_select(&meta, cond);
        self.find_with(sql)
    }

    /// Entities where `column = value`.
    pub fn find_by_field<T: Entity + FromRow>(
        &mut self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<Vec<T>, DbError> {
        self.find(Cond::eq(column, value))
    }

    /// Entities where `column IN (values)`. Empty input returns no rows.
    pub fn find_by_field_in<T: Entity + FromRow, V: Into<Value>>(
        &mut self,
        column: &str,
        values: Vec<V>,
    ) -> Result<Vec<T>, DbError> {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        self.find(Cond::is_in(column, values, false)?)
    }

    /// Entities matching the equality conditions derived from a filter.
    pub fn find_by_condition<T: Entity + FromRow>(
        &mut self,
        source: &dyn ConditionSource,
        group: Option<&str>,
    ) -> Result<Vec<T>, DbError> {
        self.find(Cond::create(source, group))
    }

    /// First entity matching a condition.
    pub fn get<T: Entity + FromRow>(&mut self, cond: Cond) -> Result<Option<T>, DbError> {
        Ok(self.find_top(1, cond)?.into_iter().next())
    }

    /// First entity of an ad-hoc query.
    pub fn get_with<T: FromRow>(&mut self, sql: Sql) -> Result<Option<T>, DbError> {
        Ok(self.find_top_with(1, sql)?.into_iter().next())
    }

    /// Entity with the given primary key.
    pub fn get_by_id<T: Entity + FromRow>(
        &mut self,
        id: impl Into<Value>,
    ) -> Result<Option<T>, DbError> {
        let meta = metadata::of::<T>()?;
        let pk = meta.primary_key()?;
        self.get(Cond::eq(pk.column, id))
    }

    /// First entity where `column = value`.
    pub fn get_by_field<T: Entity + FromRow>(
        &mut self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<Option<T>, DbError> {
        self.get(Cond::eq(column, value))
    }

    /// First entity matching the conditions derived from a filter.
    pub fn get_by_condition<T: Entity + FromRow>(
        &mut self,
        source: &dyn ConditionSource,
        group: Option<&str>,
    ) -> Result<Option<T>, DbError> {
        self.get(Cond::create(source, group))
    }

    /// Row count for entities matching a condition.
    pub fn count<T: Entity>(&mut self, cond: Cond) -> Result<i64, DbError> {
        let meta = metadata::of::<T>()?;
        let sql = self.entity_select(&meta, cond);
        self.count_with(sql)
    }

    /// Row count of an ad-hoc query.
    pub fn count_with(&mut self, sql: Sql) -> Result<i64, DbError> {
        let sql = self.shared.dialect.count(sql);
        let rows = self.query_sql(sql)?;
        let value = rows
            .first()
            .and_then(|row| row.get_at(0))
            .ok_or_else(|| DbError::execution("count query returned no rows"))?;
        value.as_i64().ok_or_else(|| {
            DbError::Mapping(format!("count query returned non-numeric value {value}"))
        })
    }

    /// One page of entities matching a condition, with totals.
    pub fn find_page<T: Entity + FromRow>(
        &mut self,
        cond: Cond,
        pageable: Pageable,
    ) -> Result<Page<T>, DbError> {
        let meta = metadata::of::<T>()?;
        let sql = self.entity_select(&meta, cond);
        self.find_page_with(sql, pageable)
    }

    /// One page of an ad-hoc query, with totals.
    pub fn find_page_with<T: FromRow>(
        &mut self,
        sql: Sql,
        pageable: Pageable,
    ) -> Result<Page<T>, DbError> {
        self.check_page_size(pageable)?;
        if !pageable.limits_rows() {
            let data: Vec<T> = self.find_with(sql)?;
            let total = data.len() as i64;
            return Ok(Page::of(data, pageable, total));
        }
        let paged = self
            .shared
            .dialect
            .select_top(pageable.current_page, pageable.page_size, sql.clone());
        let data = self.find_with(paged)?;
        let total = self.count_with(sql)?;
        Ok(Page::of(data, pageable, total))
    }

    /// One page of entities, without the count query.
    pub fn find_page_lite<T: Entity + FromRow>(
        &mut self,
        cond: Cond,
        pageable: Pageable,
    ) -> Result<PageLite<T>, DbError> {
        let meta = metadata::of::<T>()?;
        let sql = self.entity_select(&meta, cond);
        self.find_page_lite_with(sql, pageable)
    }

    /// One page of an ad-hoc query, without the count query.
    pub fn find_page_lite_with<T: FromRow>(
        &mut self,
        sql: Sql,
        pageable: Pageable,
    ) -> Result<PageLite<T>, DbError> {
        self.check_page_size(pageable)?;
        let sql = if pageable.limits_rows() {
            self.shared
                .dialect
                .select_top(pageable.current_page, pageable.page_size, sql)
        } else {
            sql
        };
        let data = self.find_with(sql)?;
        Ok(PageLite::of(data, pageable))
    }

    // ---- writes ---------------------------------------------------------

    /// Run a write statement, returning the affected row count.
    pub fn execute(&mut self, sql: Sql) -> Result<u64, DbError> {
        Ok(self.execute_sql(sql, false)?.affected_rows)
    }

    /// Run several write statements on this connection, summing the counts.
    pub fn execute_all(&mut self, statements: Vec<Sql>) -> Result<u64, DbError> {
        let mut affected = 0;
        for sql in statements {
            affected += self.execute(sql)?;
        }
        Ok(affected)
    }

    /// Insert one entity, generating its key per the entity's strategy. An
    /// identity key assigned by the database is written back into the entity.
    pub fn create<T: Entity>(&mut self, record: &mut T) -> Result<u64, DbError> {
        let meta = metadata::of::<T>()?;
        let pk = meta.primary_key()?;
        self.fill_key(record, &meta)?;

        let template = self.shared.dialect.insert(&meta)?;
        let params = self.insert_params(record, &meta)?;
        let want_keys = meta.strategy() == GenerationType::Identity;
        let result = self.execute_sql(Sql::with_params(template.sql(), params), want_keys)?;
        if want_keys {
            if let Some(key) = result.generated_keys.into_iter().next() {
                record.set(pk.field, key)?;
            }
        }
        Ok(result.affected_rows)
    }

    /// Insert many entities in chunks of `batch_size`. Identity keys are
    /// written back positionally, in input order.
    pub fn create_all<T: Entity>(&mut self, records: &mut [T]) -> Result<u64, DbError> {
        if records.is_empty() {
            return Ok(0);
        }
        let meta = metadata::of::<T>()?;
        let pk = meta.primary_key()?;
        for record in records.iter_mut() {
            self.fill_key(record, &meta)?;
        }

        let template = self.shared.dialect.insert(&meta)?;
        let rows = records
            .iter()
            .map(|record| self.insert_params(record, &meta))
            .collect::<Result<Vec<_>, _>>()?;

        let want_keys = meta.strategy() == GenerationType::Identity;
        let mut affected = 0;
        let mut keys: Vec<Value> = Vec::new();
        for chunk in rows.chunks(self.shared.config.batch_size.max(1)) {
            let result = self.execute_batch_sql(template.sql(), chunk, want_keys)?;
            affected += result.affected_rows;
            keys.extend(result.generated_keys);
        }
        if want_keys {
            for (record, key) in records.iter_mut().zip(keys) {
                record.set(pk.field, key)?;
            }
        }
        Ok(affected)
    }

    /// Update every non-key column of one entity.
    pub fn update<T: Entity>(&mut self, record: &T) -> Result<u64, DbError> {
        self.update_one(record, false)
    }

    /// Update the non-null, non-key columns of one entity.
    pub fn update_ignore_null<T: Entity>(&mut self, record: &T) -> Result<u64, DbError> {
        self.update_one(record, true)
    }

    /// Update an explicit subset of columns. Unknown or primary-key column
    /// names are rejected before any SQL is issued.
    pub fn update_columns<T: Entity>(
        &mut self,
        record: &T,
        columns: &[&str],
    ) -> Result<u64, DbError> {
        let meta = metadata::of::<T>()?;
        let pk = meta.primary_key()?;
        let mut sets = Vec::with_capacity(columns.len());
        let mut params = Vec::with_capacity(columns.len() + 1);
        for column in columns {
            let attr = meta.attribute_by_column(column).ok_or_else(|| {
                DbError::Mapping(format!(
                    "{} has no column named {column}",
                    meta.type_name()
                ))
            })?;
            if attr.primary_key {
                return Err(DbError::Mapping(format!(
                    "primary key column {column} cannot be updated"
                )));
            }
            sets.push(format!("{} = ?", attr.column));
            params.push(entity::field_value(record, attr.field)?);
        }
        if sets.is_empty() {
            return Err(DbError::Mapping(format!(
                "no columns to update on {}",
                meta.table_name()
            )));
        }
        params.push(self.required_pk_value(record, &meta)?);
        let sql = Sql::with_params(
            format!(
                "UPDATE {} SET {} WHERE {} = ?",
                meta.table_name(),
                sets.join(", "),
                pk.column
            ),
            params,
        );
        self.execute(sql)
    }

    /// Update every non-key column of many entities, chunked by `batch_size`.
    pub fn update_all<T: Entity>(&mut self, records: &[T]) -> Result<u64, DbError> {
        if records.is_empty() {
            return Ok(0);
        }
        let meta = metadata::of::<T>()?;
        let columns: Vec<&str> = meta.update_attributes().iter().map(|a| a.column).collect();
        self.update_all_columns(records, &columns)
    }

    /// Update an explicit subset of columns on many entities, chunked by
    /// `batch_size`. The column list is validated once, with the same policy
    /// as [`update_columns`](Database::update_columns): unknown or
    /// primary-key column names are rejected before any SQL is issued.
    pub fn update_all_columns<T: Entity>(
        &mut self,
        records: &[T],
        columns: &[&str],
    ) -> Result<u64, DbError> {
        if records.is_empty() {
            return Ok(0);
        }
        let meta = metadata::of::<T>()?;
        let pk = meta.primary_key()?;
        let mut attrs = Vec::with_capacity(columns.len());
        for column in columns {
            let attr = meta.attribute_by_column(column).ok_or_else(|| {
                DbError::Mapping(format!(
                    "{} has no column named {column}",
                    meta.type_name()
                ))
            })?;
            if attr.primary_key {
                return Err(DbError::Mapping(format!(
                    "primary key column {column} cannot be updated"
                )));
            }
            attrs.push(attr);
        }
        if attrs.is_empty() {
            return Err(DbError::Mapping(format!(
                "no columns to update on {}",
                meta.table_name()
            )));
        }
        let sets = attrs
            .iter()
            .map(|a| format!("{} = ?", a.column))
            .collect::<Vec<_>>()
            .join(", ");
        let template = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            meta.table_name(),
            sets,
            pk.column
        );

        let rows = records
            .iter()
            .map(|record| {
                let mut params = attrs
                    .iter()
                    .map(|attr| entity::field_value(record, attr.field))
                    .collect::<Result<Vec<_>, _>>()?;
                params.push(self.required_pk_value(record, &meta)?);
                Ok(params)
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        let mut affected = 0;
        for chunk in rows.chunks(self.shared.config.batch_size.max(1)) {
            affected += self.execute_batch_sql(&template, chunk, false)?.affected_rows;
        }
        Ok(affected)
    }

    /// Delete one entity by its primary key value.
    pub fn delete<T: Entity>(&mut self, record: &T) -> Result<u64, DbError> {
        let meta = metadata::of::<T>()?;
        let id = self.required_pk_value(record, &meta)?;
        self.delete_by_id::<T>(id)
    }

    /// Delete many entities by their primary key values.
    pub fn delete_all<T: Entity>(&mut self, records: &[T]) -> Result<u64, DbError> {
        let meta = metadata::of::<T>()?;
        let ids = records
            .iter()
            .map(|record| self.required_pk_value(record, &meta))
            .collect::<Result<Vec<_>, _>>()?;
        self.delete_by_ids::<T, Value>(ids)
    }

    /// Delete the entity with the given primary key.
    pub fn delete_by_id<T: Entity>(&mut self, id: impl Into<Value>) -> Result<u64, DbError> {
        let meta = metadata::of::<T>()?;
        let pk = meta.primary_key()?;
        let sql = Sql::delete(meta.table_name()).where_cond(Cond::eq(pk.column, id));
        self.execute(sql)
    }

    /// Delete entities whose primary key is in `ids`. Empty input is a no-op
    /// reporting zero affected rows.
    pub fn delete_by_ids<T: Entity, V: Into<Value>>(
        &mut self,
        ids: Vec<V>,
    ) -> Result<u64, DbError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let meta = metadata::of::<T>()?;
        let pk = meta.primary_key()?;
        let sql =
            Sql::delete(meta.table_name()).where_cond(Cond::is_in(pk.column, ids, false)?);
        self.execute(sql)
    }

    /// Delete entities matching a condition.
    pub fn delete_by_cond<T: Entity>(&mut self, cond: Cond) -> Result<u64, DbError> {
        let meta = metadata::of::<T>()?;
        let sql = if cond.is_empty() {
            Sql::delete(meta.table_name())
        } else {
            Sql::delete(meta.table_name()).where_cond(cond)
        };
        self.execute(sql)
    }

    // ---- lifecycle ------------------------------------------------------

    /// Commit the transaction (if any) and close the context.
    pub fn commit(mut self) -> Result<(), DbError> {
        if let Some(conn) = self.conn.as_mut() {
            if self.in_transaction {
                conn.commit()?;
                self.in_transaction = false;
                log::debug!("transaction committed");
            }
        }
        self.close_inner()
    }

    /// Roll back the transaction (if any) and close the context.
    pub fn rollback(mut self) -> Result<(), DbError> {
        if let Some(conn) = self.conn.as_mut() {
            if self.in_transaction {
                conn.rollback()?;
                self.in_transaction = false;
                log::debug!("transaction rolled back");
            }
        }
        self.close_inner()
    }

    /// Close the context, rolling back a still-open transaction. Idempotent.
    pub fn close(mut self) -> Result<(), DbError> {
        self.close_inner()
    }

    fn close_inner(&mut self) -> Result<(), DbError> {
        let Some(mut conn) = self.conn.take() else {
            return Ok(());
        };
        if self.in_transaction {
            self.in_transaction = false;
            log::debug!("closing with an open transaction, rolling back");
            conn.rollback()?;
        }
        // Dropping the box returns the connection to its provider.
        Ok(())
    }

    // ---- internals ------------------------------------------------------

    fn entity_select(&self, meta: &EntityMeta, cond: Cond) -> Sql {
        let sql = self.shared.dialect.select(meta);
        if cond.is_empty() {
            sql
        } else {
            sql.where_cond(cond)
        }
    }

    fn check_page_size(&self, pageable: Pageable) -> Result<(), DbError> {
        let max = self.shared.config.max_page_size;
        if max > 0 && pageable.limits_rows() && pageable.page_size > max {
            return Err(DbError::MaxPageSizeExceeded {
                page_size: pageable.page_size,
                max_page_size: max,
            });
        }
        Ok(())
    }

    /// Assign a generated key when the strategy calls for one. Assigned keys
    /// must already be present.
    fn fill_key<T: Entity>(&self, record: &mut T, meta: &EntityMeta) -> Result<(), DbError> {
        let pk = meta.primary_key()?;
        let current = entity::field_value(record, pk.field)?;
        match meta.strategy() {
            GenerationType::Assigned => {
                if current.is_null() {
                    return Err(DbError::MissingPrimaryKey(format!(
                        "{} uses an assigned key but {} is null",
                        meta.type_name(),
                        pk.field
                    )));
                }
            }
            GenerationType::Identity => {}
            GenerationType::Uuid => {
                if current.is_null() {
                    record.set(pk.field, Value::String(Some(pk::next_uuid())))?;
                }
            }
            GenerationType::SnowFlake => {
                if current.is_null() {
                    let id = self.shared.snowflake.next_id()?;
                    record.set(pk.field, Value::BigInt(Some(id)))?;
                }
            }
        }
        Ok(())
    }

    /// Bind values for the insert template: key first unless the database
    /// generates it, then the non-key columns in declaration order.
    fn insert_params<T: Entity>(
        &self,
        record: &T,
        meta: &EntityMeta,
    ) -> Result<Vec<Value>, DbError> {
        let mut params = Vec::with_capacity(meta.attributes().len());
        if meta.strategy() != GenerationType::Identity {
            let pk = meta.primary_key()?;
            params.push(entity::field_value(record, pk.field)?);
        }
        params.extend(self.update_values(record, meta)?);
        Ok(params)
    }

    fn update_values<T: Entity>(
        &self,
        record: &T,
        meta: &EntityMeta,
    ) -> Result<Vec<Value>, DbError> {
        meta.update_attributes()
            .iter()
            .map(|attr| entity::field_value(record, attr.field))
            .collect()
    }

    fn update_one<T: Entity>(&mut self, record: &T, ignore_nulls: bool) -> Result<u64, DbError> {
        let meta = metadata::of::<T>()?;
        let values = self.update_values(record, &meta)?;
        let pk_value = self.required_pk_value(record, &meta)?;
        let sql = self
            .shared
            .dialect
            .update(&meta, &values, pk_value, ignore_nulls)?;
        self.execute(sql)
    }

    fn required_pk_value<T: Entity>(
        &self,
        record: &T,
        meta: &EntityMeta,
    ) -> Result<Value, DbError> {
        let pk = meta.primary_key()?;
        let value = entity::field_value(record, pk.field)?;
        if value.is_null() {
            return Err(DbError::MissingPrimaryKey(format!(
                "{} value of {} is null",
                pk.field,
                meta.type_name()
            )));
        }
        Ok(value)
    }

    fn conn(&mut self) -> Result<&mut dyn Connection, DbError> {
        match self.conn.as_deref_mut() {
            Some(conn) => Ok(conn),
            None => Err(DbError::execution("execution context is already closed")),
        }
    }

    fn query_sql(&mut self, sql: Sql) -> Result<Vec<Row>, DbError> {
        let sql_log = self.shared.sql_log;
        let (text, params) = sql.into_parts();
        sql_log.show_sql(&text, &params);
        let started = Instant::now();
        let rows = self.conn()?.query(&text, &params)?;
        sql_log.show_rows(&rows, started.elapsed().as_millis());
        Ok(rows)
    }

    fn execute_sql(&mut self, sql: Sql, return_keys: bool) -> Result<ExecResult, DbError> {
        let sql_log = self.shared.sql_log;
        let (text, params) = sql.into_parts();
        sql_log.show_sql(&text, &params);
        let result = self.conn()?.execute(&text, &params, return_keys)?;
        sql_log.show_affected_rows(result.affected_rows);
        Ok(result)
    }

    fn execute_batch_sql(
        &mut self,
        sql: &str,
        rows: &[Vec<Value>],
        return_keys: bool,
    ) -> Result<ExecResult, DbError> {
        let sql_log = self.shared.sql_log;
        sql_log.show_batch_sql(sql, rows);
        let result = self.conn()?.execute_batch(sql, rows, return_keys)?;
        sql_log.show_affected_rows(result.affected_rows);
        Ok(result)
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        if self.conn.is_some() {
            if let Err(e) = self.close_inner() {
                log::warn!("error closing execution context: {e}");
            }
        }
    }
}
