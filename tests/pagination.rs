//! Pagination totals, the no-limit rule, and the max-page-size guard.

use shoal::mock::MockDb;
use shoal::page::RowPage;
use shoal::tests_cfg::Pet;
use shoal::{Cond, DbConfig, DbError, DbTemplate, Pageable, Row, Sql, Value};

fn template(mock: &MockDb) -> DbTemplate {
    DbTemplate::new(DbConfig::default(), Box::new(mock.clone())).unwrap()
}

fn pet_rows(count: i64) -> Vec<Row> {
    (0..count)
        .map(|n| {
            Row::from_pairs(vec![
                ("id", Value::BigInt(Some(n + 1))),
                ("name", Value::String(Some(format!("pet-{n}")))),
            ])
        })
        .collect()
}

fn count_row(total: i64) -> Vec<Row> {
    vec![Row::from_pairs(vec![(
        "count(*)",
        Value::BigInt(Some(total)),
    )])]
}

#[test]
fn test_find_page_computes_totals() {
    let mock = MockDb::new();
    mock.push_rows(pet_rows(10));
    mock.push_rows(count_row(95));
    let mut db = template(&mock).open().unwrap();

    let page = db
        .find_page::<Pet>(Cond::default(), Pageable::new(1, 10))
        .unwrap();

    assert_eq!(page.data.len(), 10);
    assert_eq!(page.total_records, 95);
    assert_eq!(page.total_pages, 10);
    assert_eq!(page.page_size, 10);

    let statements = mock.statements();
    assert_eq!(statements.len(), 2);
    assert!(statements[0].sql().ends_with("LIMIT ?, ?"));
    assert!(statements[1].sql().starts_with("SELECT COUNT(*) FROM ("));
}

#[test]
fn test_non_positive_page_size_means_no_limit() {
    let mock = MockDb::new();
    mock.push_rows(pet_rows(3));
    let mut db = template(&mock).open().unwrap();

    let page = db
        .find_page::<Pet>(Cond::default(), Pageable::new(1, 0))
        .unwrap();

    assert_eq!(page.total_records, 3);
    assert_eq!(page.total_pages, 1);
    assert_eq!(mock.statement_count(), 1, "no count query when unlimited");
    assert!(!mock.statements()[0].sql().contains("LIMIT"));
}

#[test]
fn test_disabled_paging_is_one_page() {
    let mock = MockDb::new();
    mock.push_rows(pet_rows(3));
    let mut db = template(&mock).open().unwrap();

    let page = db
        .find_page::<Pet>(Cond::default(), Pageable::unpaged())
        .unwrap();
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_records, 3);
}

#[test]
fn test_max_page_size_fails_before_any_statement() {
    let mock = MockDb::new();
    let config = DbConfig {
        max_page_size: 50,
        ..DbConfig::default()
    };
    let template = DbTemplate::new(config, Box::new(mock.clone())).unwrap();
    let mut db = template.open().unwrap();

    let err = db
        .find_page::<Pet>(Cond::default(), Pageable::new(1, 100))
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::MaxPageSizeExceeded {
            page_size: 100,
            max_page_size: 50
        }
    ));
    assert_eq!(mock.statement_count(), 0);

    // at or under the cap goes through
    mock.push_rows(pet_rows(5));
    mock.push_rows(count_row(5));
    db.find_page::<Pet>(Cond::default(), Pageable::new(1, 50))
        .unwrap();
    assert_eq!(mock.statement_count(), 2);
}

#[test]
fn test_ad_hoc_rows_page_without_a_declared_type() {
    let mock = MockDb::new();
    mock.push_rows(pet_rows(10));
    mock.push_rows(count_row(95));
    let mut db = template(&mock).open().unwrap();

    let page: RowPage = db
        .find_page_with(Sql::new("SELECT * FROM tb_pet"), Pageable::new(1, 10))
        .unwrap();

    assert_eq!(page.data.len(), 10);
    assert_eq!(page.data[0].try_get::<i64>("id").unwrap(), 1);
    assert_eq!(page.total_pages, 10);
}

#[test]
fn test_find_page_lite_skips_the_count_query() {
    let mock = MockDb::new();
    mock.push_rows(pet_rows(10));
    let mut db = template(&mock).open().unwrap();

    let page = db
        .find_page_lite::<Pet>(Cond::default(), Pageable::new(2, 10))
        .unwrap();

    assert_eq!(page.current_page, 2);
    assert_eq!(page.page_size, 10);
    assert_eq!(mock.statement_count(), 1);
}
