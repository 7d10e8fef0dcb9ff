//! Vendor-specific SQL generation.
//!
//! Each supported database gets a [`Dialect`] implementation that knows how
//! to express pagination and how to render the CRUD templates for an entity.
//! Dialects are stateless; [`of`] hands out shared static instances.

mod mysql;
mod oracle;
mod postgres;
mod sqlserver;

pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use sqlserver::SqlServerDialect;

use crate::clause::Sql;
use crate::error::DbError;
use crate::metadata::EntityMeta;
use crate::pk::GenerationType;
use crate::value::Value;

/// SQL generation hooks a vendor must provide.
pub trait Dialect: Send + Sync {
    /// Canonical name of the vendor this dialect targets.
    fn db_type(&self) -> &'static str;

    /// Wrap `sql` so it returns `page_size` rows starting at offset
    /// `(current_page - 1) * page_size`. A non-positive `page_size` means no
    /// limit and must leave the statement untouched.
    fn select_top(&self, current_page: i64, page_size: i64, sql: Sql) -> Sql;

    /// Wrap `sql` into a row-count query over the same result set.
    fn count(&self, sql: Sql) -> Sql {
        let (text, params) = sql.into_parts();
        Sql::with_params(format!("SELECT COUNT(*) FROM ({text}) _count"), params)
    }

    /// `SELECT {columns} FROM {table}` listing every mapped column.
    fn select(&self, meta: &EntityMeta) -> Sql {
        let columns = meta
            .attributes()
            .iter()
            .map(|a| a.column)
            .collect::<Vec<_>>()
            .join(", ");
        Sql::new(format!("SELECT {columns} FROM {}", meta.table_name()))
    }

    /// Parameterized `INSERT` template for the entity.
    ///
    /// With an identity key the database supplies the value, so the key
    /// column is left out of the column list; every other strategy binds the
    /// key first, followed by the non-key columns.
    fn insert(&self, meta: &EntityMeta) -> Result<Sql, DbError> {
        let pk = meta.primary_key()?;
        let mut columns: Vec<&str> = Vec::with_capacity(meta.attributes().len());
        if meta.strategy() != GenerationType::Identity {
            columns.push(pk.column);
        }
        columns.extend(meta.update_attributes().iter().map(|a| a.column));

        let placeholders = vec!["?"; columns.len()].join(", ");
        Ok(Sql::new(format!(
            "INSERT INTO {} ({}) VALUES ({})",
            meta.table_name(),
            columns.join(", "),
            placeholders
        )))
    }

    /// Parameterized `UPDATE ... WHERE pk = ?` for the entity.
    ///
    /// `values` holds one entry per update attribute, in metadata order. When
    /// `ignore_nulls` is set, columns whose value is null are dropped from
    /// the SET list; dropping every column is a mapping error.
    fn update(
        &self,
        meta: &EntityMeta,
        values: &[Value],
        pk_value: Value,
        ignore_nulls: bool,
    ) -> Result<Sql, DbError> {
        let pk = meta.primary_key()?;
        let mut sets: Vec<String> = Vec::with_capacity(values.len());
        let mut params: Vec<Value> = Vec::with_capacity(values.len() + 1);
        for (attr, value) in meta.update_attributes().iter().zip(values) {
            if ignore_nulls && value.is_null() {
                continue;
            }
            sets.push(format!("{} = ?", attr.column));
            params.push(value.clone());
        }
        if sets.is_empty() {
            return Err(DbError::Mapping(format!(
                "no non-null columns to update on {}",
                meta.table_name()
            )));
        }
        params.push(pk_value);
        Ok(Sql::with_params(
            format!(
                "UPDATE {} SET {} WHERE {} = ?",
                meta.table_name(),
                sets.join(", "),
                pk.column
            ),
            params,
        ))
    }
}

/// Resolve a dialect from a configured vendor name.
pub fn of(db_type: &str) -> Result<&'static dyn Dialect, DbError> {
    static MYSQL: MySqlDialect = MySqlDialect;
    static POSTGRES: PostgresDialect = PostgresDialect;
    static SQLSERVER: SqlServerDialect = SqlServerDialect;
    static ORACLE: OracleDialect = OracleDialect;

    match db_type.to_ascii_lowercase().as_str() {
        "mysql" | "mariadb" => Ok(&MYSQL),
        "postgresql" | "postgres" => Ok(&POSTGRES),
        "sqlserver" | "mssql" => Ok(&SQLSERVER),
        "oracle" => Ok(&ORACLE),
        other => Err(DbError::UnsupportedDialect(other.to_string())),
    }
}

/// Offset of the first row on `current_page`, clamping the page number to 1.
pub(crate) fn page_offset(current_page: i64, page_size: i64) -> i64 {
    let page = current_page.max(1);
    (page - 1) * page_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata;
    use crate::tests_cfg::{Owner, Pet};

    #[test]
    fn test_of_resolves_aliases() {
        assert_eq!(of("MySQL").unwrap().db_type(), "mysql");
        assert_eq!(of("mariadb").unwrap().db_type(), "mysql");
        assert_eq!(of("postgres").unwrap().db_type(), "postgresql");
        assert_eq!(of("mssql").unwrap().db_type(), "sqlserver");
        assert!(matches!(
            of("sqlite"),
            Err(DbError::UnsupportedDialect(_))
        ));
    }

    #[test]
    fn test_select_lists_all_columns() {
        let meta = metadata::of::<Pet>().unwrap();
        let sql = of("mysql").unwrap().select(&meta);
        assert_eq!(
            sql.sql(),
            "SELECT id, name, species, owner_id, adopted FROM tb_pet"
        );
    }

    #[test]
    fn test_insert_identity_omits_key_column() {
        let meta = metadata::of::<Pet>().unwrap();
        let sql = of("mysql").unwrap().insert(&meta).unwrap();
        assert_eq!(
            sql.sql(),
            "INSERT INTO tb_pet (name, species, owner_id, adopted) VALUES (?, ?, ?, ?)"
        );
    }

    #[test]
    fn test_insert_uuid_binds_key_first() {
        let meta = metadata::of::<Owner>().unwrap();
        let sql = of("mysql").unwrap().insert(&meta).unwrap();
        assert_eq!(
            sql.sql(),
            "INSERT INTO tb_owner (id, name, city) VALUES (?, ?, ?)"
        );
    }

    #[test]
    fn test_update_skips_nulls_when_asked() {
        let meta = metadata::of::<Owner>().unwrap();
        let dialect = of("mysql").unwrap();
        let values = vec![Value::String(Some("Ada".into())), Value::String(None)];
        let sql = dialect
            .update(&meta, &values, "k1".into(), true)
            .unwrap();
        assert_eq!(sql.sql(), "UPDATE tb_owner SET name = ? WHERE id = ?");
        assert_eq!(sql.params().len(), 2);

        let all_null = vec![Value::String(None), Value::String(None)];
        let err = dialect
            .update(&meta, &all_null, "k1".into(), true)
            .unwrap_err();
        assert!(matches!(err, DbError::Mapping(_)));
    }

    #[test]
    fn test_update_keeps_nulls_by_default() {
        let meta = metadata::of::<Owner>().unwrap();
        let values = vec![Value::String(Some("Ada".into())), Value::String(None)];
        let sql = of("mysql")
            .unwrap()
            .update(&meta, &values, "k1".into(), false)
            .unwrap();
        assert_eq!(
            sql.sql(),
            "UPDATE tb_owner SET name = ?, city = ? WHERE id = ?"
        );
    }
}
