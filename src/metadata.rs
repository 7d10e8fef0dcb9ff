//! Entity metadata resolution and the process-wide registry.
//!
//! Metadata for a type is computed once, on first access, and cached for the
//! process lifetime keyed by `TypeId`. Concurrent first access is a benign
//! race: every racing resolver computes equivalent metadata and exactly one
//! value is published; reads after population take only the read lock.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::entity::{Attribute, Entity};
use crate::error::DbError;
use crate::pk::GenerationType;

static REGISTRY: Lazy<RwLock<HashMap<TypeId, Arc<EntityMeta>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Resolved mapping metadata for one entity type.
#[derive(Debug)]
pub struct EntityMeta {
    type_name: &'static str,
    table_name: &'static str,
    strategy: GenerationType,
    attributes: &'static [Attribute],
    primary_key: Option<&'static Attribute>,
    update_attributes: Vec<&'static Attribute>,
}

impl EntityMeta {
    fn build<T: Entity>() -> Result<Self, DbError> {
        let type_name = std::any::type_name::<T>();
        let attributes = T::attributes();

        let mut primary_key = None;
        let mut update_attributes = Vec::new();
        for attribute in attributes {
            if attribute.primary_key {
                if primary_key.is_some() {
                    return Err(DbError::Mapping(format!(
                        "{type_name} declares more than one primary key attribute"
                    )));
                }
                primary_key = Some(attribute);
            } else {
                update_attributes.push(attribute);
            }
        }

        Ok(Self {
            type_name,
            table_name: T::table_name(),
            strategy: T::strategy(),
            attributes,
            primary_key,
            update_attributes,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn table_name(&self) -> &'static str {
        self.table_name
    }

    pub fn strategy(&self) -> GenerationType {
        self.strategy
    }

    /// All mapped attributes, in declaration order.
    pub fn attributes(&self) -> &'static [Attribute] {
        self.attributes
    }

    /// Attributes eligible for UPDATE statements (primary key excluded), in
    /// declaration order.
    pub fn update_attributes(&self) -> &[&'static Attribute] {
        &self.update_attributes
    }

    /// The primary-key attribute, or a mapping error when none is declared.
    ///
    /// Zero primary keys is tolerated at resolution time so plain view/result
    /// types can be mapped; the failure happens when a caller actually needs
    /// the key.
    pub fn primary_key(&self) -> Result<&'static Attribute, DbError> {
        self.primary_key.ok_or_else(|| {
            DbError::Mapping(format!(
                "{} has no attribute marked as primary key",
                self.type_name
            ))
        })
    }

    /// Look up a mapped attribute by column name, case-insensitively.
    pub fn attribute_by_column(&self, column: &str) -> Option<&'static Attribute> {
        self.attributes
            .iter()
            .find(|a| a.column.eq_ignore_ascii_case(column))
    }
}

/// Resolve (and memoize) the metadata for `T`.
pub fn of<T: Entity>() -> Result<Arc<EntityMeta>, DbError> {
    let key = TypeId::of::<T>();

    if let Some(meta) = REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(&key)
    {
        return Ok(Arc::clone(meta));
    }

    // Built outside the write lock; racing builders compute the same value.
    let meta = Arc::new(EntityMeta::build::<T>()?);

    let mut registry = REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let published = registry.entry(key).or_insert(meta);
    Ok(Arc::clone(published))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Row;
    use crate::value::Value;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Widget {
        id: Option<i64>,
        label: Option<String>,
    }

    impl Entity for Widget {
        fn table_name() -> &'static str {
            "tb_widget"
        }

        fn strategy() -> GenerationType {
            GenerationType::SnowFlake
        }

        fn attributes() -> &'static [Attribute] {
            static ATTRIBUTES: [Attribute; 2] = [
                Attribute::primary_key("id", "id"),
                Attribute::new("label", "label"),
            ];
            &ATTRIBUTES
        }

        fn get(&self, field: &str) -> Option<Value> {
            match field {
                "id" => Some(self.id.into()),
                "label" => Some(self.label.clone().into()),
                _ => None,
            }
        }

        fn set(&mut self, field: &str, value: Value) -> Result<(), DbError> {
            use crate::value::TryGetable;
            match field {
                "id" => self.id = i64::try_get_opt(value)?,
                "label" => self.label = String::try_get_opt(value)?,
                _ => {
                    return Err(DbError::Mapping(format!("Widget has no field '{field}'")));
                }
            }
            Ok(())
        }
    }

    #[derive(Debug, Clone, Default)]
    struct NoKeyView {
        total: Option<i64>,
    }

    impl Entity for NoKeyView {
        fn table_name() -> &'static str {
            "v_totals"
        }

        fn strategy() -> GenerationType {
            GenerationType::Assigned
        }

        fn attributes() -> &'static [Attribute] {
            static ATTRIBUTES: [Attribute; 1] = [Attribute::new("total", "total")];
            &ATTRIBUTES
        }

        fn get(&self, field: &str) -> Option<Value> {
            match field {
                "total" => Some(self.total.into()),
                _ => None,
            }
        }

        fn set(&mut self, field: &str, value: Value) -> Result<(), DbError> {
            use crate::value::TryGetable;
            match field {
                "total" => self.total = i64::try_get_opt(value)?,
                _ => return Err(DbError::Mapping(format!("NoKeyView has no field '{field}'"))),
            }
            Ok(())
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = of::<Widget>().unwrap();
        let second = of::<Widget>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.table_name(), "tb_widget");
        assert_eq!(first.strategy(), GenerationType::SnowFlake);
        assert_eq!(first.attributes().len(), 2);
    }

    #[test]
    fn test_update_attributes_exclude_primary_key() {
        let meta = of::<Widget>().unwrap();
        let columns: Vec<&str> = meta.update_attributes().iter().map(|a| a.column).collect();
        assert_eq!(columns, vec!["label"]);
        assert_eq!(meta.primary_key().unwrap().column, "id");
    }

    #[test]
    fn test_missing_primary_key_fails_on_demand() {
        let meta = of::<NoKeyView>().unwrap();
        let err = meta.primary_key().unwrap_err();
        assert!(matches!(err, DbError::Mapping(_)));
        assert!(err.to_string().contains("NoKeyView"));
    }

    #[test]
    fn test_attribute_lookup_by_column_is_case_insensitive() {
        let meta = of::<Widget>().unwrap();
        assert_eq!(meta.attribute_by_column("LABEL").unwrap().field, "label");
        assert!(meta.attribute_by_column("missing").is_none());
    }

    #[test]
    fn test_entity_from_row_ignores_missing_columns() {
        let row = Row::from_pairs(vec![("label", Value::String(Some("bolt".into())))]);
        let widget: Widget = crate::entity::from_row(&row).unwrap();
        assert_eq!(widget.label.as_deref(), Some("bolt"));
        assert_eq!(widget.id, None);
    }
}
