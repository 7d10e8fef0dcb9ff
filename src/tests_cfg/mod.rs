//! Sample mapped types used across the test suites, one per key strategy.

use crate::clause::{ConditionField, ConditionSource};
use crate::entity::{self, Attribute, Entity};
use crate::error::DbError;
use crate::pk::GenerationType;
use crate::row::{FromRow, Row};
use crate::value::{TryGetable, Value};

/// UUID keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Owner {
    pub id: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
}

static OWNER_ATTRIBUTES: [Attribute; 3] = [
    Attribute::primary_key("id", "id"),
    Attribute::new("name", "name"),
    Attribute::new("city", "city"),
];

impl Entity for Owner {
    fn table_name() -> &'static str {
        "tb_owner"
    }

    fn strategy() -> GenerationType {
        GenerationType::Uuid
    }

    fn attributes() -> &'static [Attribute] {
        &OWNER_ATTRIBUTES
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.clone().into()),
            "name" => Some(self.name.clone().into()),
            "city" => Some(self.city.clone().into()),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), DbError> {
        match field {
            "id" => self.id = String::try_get_opt(value)?,
            "name" => self.name = String::try_get_opt(value)?,
            "city" => self.city = String::try_get_opt(value)?,
            other => {
                return Err(DbError::Mapping(format!("Owner has no field '{other}'")));
            }
        }
        Ok(())
    }
}

impl FromRow for Owner {
    fn from_row(row: &Row) -> Result<Self, DbError> {
        entity::from_row(row)
    }
}

/// Identity keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pet {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub species: Option<String>,
    pub owner_id: Option<String>,
    pub adopted: Option<bool>,
}

static PET_ATTRIBUTES: [Attribute; 5] = [
    Attribute::primary_key("id", "id"),
    Attribute::new("name", "name"),
    Attribute::new("species", "species"),
    Attribute::new("owner_id", "owner_id"),
    Attribute::new("adopted", "adopted"),
];

impl Entity for Pet {
    fn table_name() -> &'static str {
        "tb_pet"
    }

    fn strategy() -> GenerationType {
        GenerationType::Identity
    }

    fn attributes() -> &'static [Attribute] {
        &PET_ATTRIBUTES
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.clone().into()),
            "species" => Some(self.species.clone().into()),
            "owner_id" => Some(self.owner_id.clone().into()),
            "adopted" => Some(self.adopted.into()),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), DbError> {
        match field {
            "id" => self.id = i64::try_get_opt(value)?,
            "name" => self.name = String::try_get_opt(value)?,
            "species" => self.species = String::try_get_opt(value)?,
            "owner_id" => self.owner_id = String::try_get_opt(value)?,
            "adopted" => self.adopted = bool::try_get_opt(value)?,
            other => {
                return Err(DbError::Mapping(format!("Pet has no field '{other}'")));
            }
        }
        Ok(())
    }
}

impl FromRow for Pet {
    fn from_row(row: &Row) -> Result<Self, DbError> {
        entity::from_row(row)
    }
}

/// Snowflake keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Visit {
    pub id: Option<i64>,
    pub pet_id: Option<i64>,
    pub notes: Option<String>,
}

static VISIT_ATTRIBUTES: [Attribute; 3] = [
    Attribute::primary_key("id", "id"),
    Attribute::new("pet_id", "pet_id"),
    Attribute::new("notes", "notes"),
];

impl Entity for Visit {
    fn table_name() -> &'static str {
        "tb_visit"
    }

    fn strategy() -> GenerationType {
        GenerationType::SnowFlake
    }

    fn attributes() -> &'static [Attribute] {
        &VISIT_ATTRIBUTES
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.into()),
            "pet_id" => Some(self.pet_id.into()),
            "notes" => Some(self.notes.clone().into()),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), DbError> {
        match field {
            "id" => self.id = i64::try_get_opt(value)?,
            "pet_id" => self.pet_id = i64::try_get_opt(value)?,
            "notes" => self.notes = String::try_get_opt(value)?,
            other => {
                return Err(DbError::Mapping(format!("Visit has no field '{other}'")));
            }
        }
        Ok(())
    }
}

impl FromRow for Visit {
    fn from_row(row: &Row) -> Result<Self, DbError> {
        entity::from_row(row)
    }
}

/// Caller-assigned keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clinic {
    pub code: Option<String>,
    pub name: Option<String>,
}

static CLINIC_ATTRIBUTES: [Attribute; 2] = [
    Attribute::primary_key("code", "code"),
    Attribute::new("name", "name"),
];

impl Entity for Clinic {
    fn table_name() -> &'static str {
        "tb_clinic"
    }

    fn strategy() -> GenerationType {
        GenerationType::Assigned
    }

    fn attributes() -> &'static [Attribute] {
        &CLINIC_ATTRIBUTES
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "code" => Some(self.code.clone().into()),
            "name" => Some(self.name.clone().into()),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), DbError> {
        match field {
            "code" => self.code = String::try_get_opt(value)?,
            "name" => self.name = String::try_get_opt(value)?,
            other => {
                return Err(DbError::Mapping(format!("Clinic has no field '{other}'")));
            }
        }
        Ok(())
    }
}

impl FromRow for Clinic {
    fn from_row(row: &Row) -> Result<Self, DbError> {
        entity::from_row(row)
    }
}

/// Search filter over pets, with the status fields in their own group.
#[derive(Debug, Clone, Default)]
pub struct PetFilter {
    pub species: Option<String>,
    pub owner_id: Option<String>,
    pub adopted: Option<bool>,
}

impl ConditionSource for PetFilter {
    fn condition_fields(&self) -> Vec<ConditionField> {
        vec![
            ConditionField::new("species", self.species.clone()),
            ConditionField::new("owner_id", self.owner_id.clone()),
            ConditionField::grouped("adopted", "status", self.adopted),
        ]
    }
}
