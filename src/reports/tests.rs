#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::ledger::add_transaction;
use crate::models::TransactionKind;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn setup() -> (Database, Session) {
    let db = Database::open_in_memory().unwrap();
    crate::auth::register(&db, "alice", "pw").unwrap();
    let session = crate::auth::login(&db, "alice", "pw").unwrap().unwrap();
    (db, session)
}

#[test]
fn test_empty_report_is_zero() {
    let (db, alice) = setup();
    let report = generate_reports(&db, &alice, at(2024, 6, 15)).unwrap();
    assert_eq!(report.month, "2024-06");
    assert_eq!(report.year, "2024");
    for kind in TransactionKind::all() {
        assert_eq!(report.monthly.total(*kind), Decimal::ZERO);
        assert_eq!(report.yearly.total(*kind), Decimal::ZERO);
    }
    assert_eq!(report.monthly.savings(), Decimal::ZERO);
}

#[test]
fn test_monthly_and_yearly_windows() {
    let (db, alice) = setup();
    let add = |amount, kind, when| {
        add_transaction(&db, &alice, amount, "Misc", kind, when).unwrap();
    };
    add(dec!(2000), TransactionKind::Income, at(2024, 6, 1));
    add(dec!(300.50), TransactionKind::Expense, at(2024, 6, 2));
    add(dec!(99.50), TransactionKind::Expense, at(2024, 6, 30));
    add(dec!(1500), TransactionKind::Income, at(2024, 1, 10));
    add(dec!(400), TransactionKind::Expense, at(2024, 12, 31));
    add(dec!(7777), TransactionKind::Income, at(2023, 6, 15));

    let report = generate_reports(&db, &alice, at(2024, 6, 15)).unwrap();

    assert_eq!(report.monthly.income, dec!(2000));
    assert_eq!(report.monthly.expense, dec!(400));
    assert_eq!(report.monthly.savings(), dec!(1600));

    assert_eq!(report.yearly.income, dec!(3500));
    assert_eq!(report.yearly.expense, dec!(800));
    assert_eq!(report.yearly.savings(), dec!(2700));
}

#[test]
fn test_savings_with_one_side_zero() {
    let (db, alice) = setup();
    let now = at(2024, 6, 15);
    add_transaction(&db, &alice, dec!(45), "Food", TransactionKind::Expense, now).unwrap();

    let report = generate_reports(&db, &alice, now).unwrap();
    assert_eq!(report.monthly.income, Decimal::ZERO);
    assert_eq!(report.monthly.savings(), dec!(-45));
    assert_eq!(report.yearly.savings(), dec!(-45));
}

#[test]
fn test_report_is_repeatable() {
    let (db, alice) = setup();
    let now = at(2024, 6, 15);
    add_transaction(&db, &alice, dec!(10), "Food", TransactionKind::Expense, now).unwrap();
    add_transaction(&db, &alice, dec!(25), "Gift", TransactionKind::Income, now).unwrap();

    let first = generate_reports(&db, &alice, now).unwrap();
    let second = generate_reports(&db, &alice, now).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_report_ignores_other_users() {
    let (db, alice) = setup();
    crate::auth::register(&db, "bob", "pw").unwrap();
    let bob = crate::auth::login(&db, "bob", "pw").unwrap().unwrap();
    let now = at(2024, 6, 15);
    add_transaction(&db, &bob, dec!(500), "Salary", TransactionKind::Income, now).unwrap();

    let report = generate_reports(&db, &alice, now).unwrap();
    assert_eq!(report.yearly.income, Decimal::ZERO);
}
