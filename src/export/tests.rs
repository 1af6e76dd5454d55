#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::ledger::add_transaction;
use crate::models::TransactionKind;

fn setup() -> (Database, Session) {
    let db = Database::open_in_memory().unwrap();
    crate::auth::register(&db, "alice", "pw").unwrap();
    let session = crate::auth::login(&db, "alice", "pw").unwrap().unwrap();

    let day = |m, d| {
        NaiveDate::from_ymd_opt(2024, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    };
    add_transaction(&db, &session, dec!(2500), "Salary", TransactionKind::Income, day(1, 2)).unwrap();
    add_transaction(&db, &session, dec!(12.40), "Food, takeaway", TransactionKind::Expense, day(1, 3)).unwrap();
    add_transaction(&db, &session, dec!(80), "Fuel", TransactionKind::Expense, day(2, 9)).unwrap();
    (db, session)
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    rdr.records()
        .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn test_export_all() {
    let (db, session) = setup();
    let file = tempfile::NamedTempFile::new().unwrap();

    let count = export_transactions_csv(&db, &session, file.path(), None).unwrap();
    assert_eq!(count, 3);

    let rows = read_rows(file.path());
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], vec!["id", "date", "category", "kind", "amount"]);
    assert_eq!(rows[1][2], "Fuel");
    // Embedded comma survives quoting
    assert_eq!(rows[2][2], "Food, takeaway");
    assert_eq!(rows[2][3], "Expense");
    assert_eq!(rows[2][4], "12.40");
    assert_eq!(rows[3][1], "2024-01-02 10:00:00");
}

#[test]
fn test_export_by_month() {
    let (db, session) = setup();
    let file = tempfile::NamedTempFile::new().unwrap();

    let count = export_transactions_csv(&db, &session, file.path(), Some("2024-01")).unwrap();
    assert_eq!(count, 2);
    assert_eq!(read_rows(file.path()).len(), 3);
}

#[test]
fn test_export_empty_writes_header() {
    let (db, session) = setup();
    let file = tempfile::NamedTempFile::new().unwrap();

    let count = export_transactions_csv(&db, &session, file.path(), Some("2030-01")).unwrap();
    assert_eq!(count, 0);
    assert_eq!(read_rows(file.path()).len(), 1);
}

#[test]
fn test_export_bad_path() {
    let (db, session) = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    assert!(export_transactions_csv(&db, &session, &path, None).is_err());
}
