//! CRUD operations against the scripted driver, one scenario per key
//! strategy.

use shoal::mock::{MockDb, Statement};
use shoal::tests_cfg::{Clinic, Owner, Pet, Visit};
use shoal::{DbConfig, DbError, DbTemplate, Row, Value};

fn template(mock: &MockDb) -> DbTemplate {
    DbTemplate::new(DbConfig::default(), Box::new(mock.clone())).unwrap()
}

#[test]
fn test_create_uuid_assigns_key_and_binds_it_first() {
    let mock = MockDb::new();
    let mut db = template(&mock).open().unwrap();

    let mut owner = Owner {
        name: Some("Ada".into()),
        city: Some("Sydney".into()),
        ..Owner::default()
    };
    let affected = db.create(&mut owner).unwrap();
    assert_eq!(affected, 1);

    let id = owner.id.expect("key assigned before insert");
    assert_eq!(id.len(), 32);

    let statements = mock.statements();
    assert_eq!(statements.len(), 1);
    match &statements[0] {
        Statement::Execute { sql, params } => {
            assert_eq!(sql, "INSERT INTO tb_owner (id, name, city) VALUES (?, ?, ?)");
            assert_eq!(params[0], Value::String(Some(id)));
            assert_eq!(params[1], Value::String(Some("Ada".into())));
        }
        other => panic!("expected an execute, got {other:?}"),
    }
}

#[test]
fn test_create_identity_writes_generated_key_back() {
    let mock = MockDb::new();
    let mut db = template(&mock).open().unwrap();

    let mut pet = Pet {
        name: Some("Flora".into()),
        species: Some("cat".into()),
        ..Pet::default()
    };
    db.create(&mut pet).unwrap();

    assert_eq!(pet.id, Some(1));
    let statements = mock.statements();
    assert_eq!(
        statements[0].sql(),
        "INSERT INTO tb_pet (name, species, owner_id, adopted) VALUES (?, ?, ?, ?)"
    );
}

#[test]
fn test_create_snowflake_assigns_positive_key() {
    let mock = MockDb::new();
    let mut db = template(&mock).open().unwrap();

    let mut visit = Visit {
        pet_id: Some(7),
        notes: Some("first checkup".into()),
        ..Visit::default()
    };
    db.create(&mut visit).unwrap();
    assert!(visit.id.unwrap() > 0);
}

#[test]
fn test_create_assigned_requires_key() {
    let mock = MockDb::new();
    let mut db = template(&mock).open().unwrap();

    let mut clinic = Clinic {
        name: Some("Downtown".into()),
        ..Clinic::default()
    };
    let err = db.create(&mut clinic).unwrap_err();
    assert!(matches!(err, DbError::MissingPrimaryKey(_)));
    assert_eq!(mock.statement_count(), 0, "failed before issuing SQL");

    clinic.code = Some("DT-01".into());
    assert_eq!(db.create(&mut clinic).unwrap(), 1);
}

#[test]
fn test_get_by_id_maps_row_to_entity() {
    let mock = MockDb::new();
    mock.push_rows(vec![Row::from_pairs(vec![
        ("id", Value::BigInt(Some(9))),
        ("name", Value::String(Some("Flora".into()))),
        ("species", Value::String(Some("cat".into()))),
        ("owner_id", Value::String(None)),
        ("adopted", Value::Bool(Some(true))),
    ])]);
    let mut db = template(&mock).open().unwrap();

    let pet: Pet = db.get_by_id(9i64).unwrap().expect("one row scripted");
    assert_eq!(pet.id, Some(9));
    assert_eq!(pet.name.as_deref(), Some("Flora"));
    assert_eq!(pet.owner_id, None);
    assert_eq!(pet.adopted, Some(true));

    // default dialect is mysql, so the top-1 read carries a LIMIT
    let statements = mock.statements();
    assert!(statements[0].sql().ends_with("WHERE id = ? LIMIT ?, ?"));
}

#[test]
fn test_uuid_round_trip_reads_back_an_identical_entity() {
    let mock = MockDb::new();
    let mut db = template(&mock).open().unwrap();

    let mut owner = Owner {
        name: Some("Ada".into()),
        city: Some("Sydney".into()),
        ..Owner::default()
    };
    db.create(&mut owner).unwrap();
    let id = owner.id.clone().expect("key assigned before insert");

    mock.push_rows(vec![Row::from_pairs(vec![
        ("id", Value::String(Some(id.clone()))),
        ("name", Value::String(Some("Ada".into()))),
        ("city", Value::String(Some("Sydney".into()))),
    ])]);
    let loaded: Owner = db.get_by_id(id.as_str()).unwrap().expect("one row scripted");
    assert_eq!(loaded, owner);
}

#[test]
fn test_update_ignore_null_drops_null_columns() {
    let mock = MockDb::new();
    let mut db = template(&mock).open().unwrap();

    let owner = Owner {
        id: Some("k1".into()),
        name: Some("Ada".into()),
        city: None,
    };
    db.update_ignore_null(&owner).unwrap();
    assert_eq!(
        mock.statements()[0].sql(),
        "UPDATE tb_owner SET name = ? WHERE id = ?"
    );

    db.update(&owner).unwrap();
    assert_eq!(
        mock.statements()[1].sql(),
        "UPDATE tb_owner SET name = ?, city = ? WHERE id = ?"
    );
}

#[test]
fn test_update_columns_rejects_unknown_and_key_columns() {
    let mock = MockDb::new();
    let mut db = template(&mock).open().unwrap();

    let pet = Pet {
        id: Some(3),
        name: Some("Flora".into()),
        ..Pet::default()
    };

    let err = db.update_columns(&pet, &["name", "colour"]).unwrap_err();
    assert!(matches!(err, DbError::Mapping(_)));

    let err = db.update_columns(&pet, &["id"]).unwrap_err();
    assert!(matches!(err, DbError::Mapping(_)));
    assert_eq!(mock.statement_count(), 0, "rejected before issuing SQL");

    db.update_columns(&pet, &["name"]).unwrap();
    assert_eq!(
        mock.statements()[0].sql(),
        "UPDATE tb_pet SET name = ? WHERE id = ?"
    );
}

#[test]
fn test_empty_id_lists_never_touch_the_driver() {
    let mock = MockDb::new();
    let mut db = template(&mock).open().unwrap();

    let affected = db.delete_by_ids::<Pet, i64>(Vec::new()).unwrap();
    assert_eq!(affected, 0);

    let found: Vec<Pet> = db.find_by_ids::<Pet, i64>(Vec::new()).unwrap();
    assert!(found.is_empty());
    assert_eq!(mock.statement_count(), 0);
}

#[test]
fn test_delete_by_ids_builds_in_clause() {
    let mock = MockDb::new();
    let mut db = template(&mock).open().unwrap();

    db.delete_by_ids::<Pet, i64>(vec![1, 2, 3]).unwrap();
    assert_eq!(
        mock.statements()[0].sql(),
        "DELETE FROM tb_pet WHERE id IN (?, ?, ?)"
    );
}
