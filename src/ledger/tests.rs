#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(18, 45, 0)
        .unwrap()
}

fn setup(name: &str) -> (Database, Session) {
    let db = Database::open_in_memory().unwrap();
    crate::auth::register(&db, name, "pw").unwrap();
    let session = crate::auth::login(&db, name, "pw").unwrap().unwrap();
    (db, session)
}

#[test]
fn test_alert_on_second_expense() {
    let (db, alice) = setup("alice");
    let now = at(2024, 5, 3);
    budget::set_budget(&db, &alice, "Food", dec!(100), now).unwrap();

    let first = add_transaction(&db, &alice, dec!(60), "Food", TransactionKind::Expense, now).unwrap();
    assert!(first.is_none());

    let second = add_transaction(&db, &alice, dec!(50), "Food", TransactionKind::Expense, now)
        .unwrap()
        .unwrap();
    assert_eq!(
        second,
        Alert {
            category: "Food".into(),
            limit: dec!(100),
            spent: dec!(110),
        }
    );
}

#[test]
fn test_income_add_still_reports_existing_overspend() {
    let (db, alice) = setup("alice");
    let now = at(2024, 5, 3);
    budget::set_budget(&db, &alice, "Food", dec!(100), now).unwrap();
    add_transaction(&db, &alice, dec!(150), "Food", TransactionKind::Expense, now).unwrap();

    // The check runs after any insert; the income itself is not spend
    let alert = add_transaction(&db, &alice, dec!(30), "Food", TransactionKind::Income, now)
        .unwrap()
        .unwrap();
    assert_eq!(alert.spent, dec!(150));
}

#[test]
fn test_no_budget_no_alert() {
    let (db, alice) = setup("alice");
    let now = at(2024, 5, 3);
    let alert = add_transaction(&db, &alice, dec!(9999), "Toys", TransactionKind::Expense, now).unwrap();
    assert!(alert.is_none());
    assert_eq!(history(&db, &alice, None).unwrap().len(), 1);
}

#[test]
fn test_invalid_kind_never_reaches_store() {
    let (db, alice) = setup("alice");
    let parsed = "Donation".parse::<TransactionKind>();
    assert!(parsed.is_err());
    assert_eq!(db.get_transaction_count(alice.user_id).unwrap(), 0);
}

#[test]
fn test_history_newest_first() {
    let (db, alice) = setup("alice");
    add_transaction(&db, &alice, dec!(1), "A", TransactionKind::Expense, at(2024, 1, 1)).unwrap();
    add_transaction(&db, &alice, dec!(2), "B", TransactionKind::Income, at(2024, 2, 1)).unwrap();
    add_transaction(&db, &alice, dec!(3), "C", TransactionKind::Expense, at(2024, 2, 15)).unwrap();

    let all = history(&db, &alice, None).unwrap();
    let categories: Vec<&str> = all.iter().map(|t| t.category.as_str()).collect();
    assert_eq!(categories, vec!["C", "B", "A"]);

    let feb = history(&db, &alice, Some("2024-02")).unwrap();
    assert_eq!(feb.len(), 2);
    assert!(feb.iter().all(|t| t.date().starts_with("2024-02")));
}

#[test]
fn test_history_is_per_user() {
    let (db, alice) = setup("alice");
    crate::auth::register(&db, "bob", "pw").unwrap();
    let bob = crate::auth::login(&db, "bob", "pw").unwrap().unwrap();
    let now = at(2024, 5, 3);

    add_transaction(&db, &alice, dec!(5), "Food", TransactionKind::Expense, now).unwrap();
    assert!(history(&db, &bob, None).unwrap().is_empty());
}

#[test]
fn test_negative_amount_is_accepted() {
    let (db, alice) = setup("alice");
    let now = at(2024, 5, 3);
    add_transaction(&db, &alice, dec!(-20), "Food", TransactionKind::Expense, now).unwrap();
    let all = history(&db, &alice, None).unwrap();
    assert_eq!(all[0].amount, dec!(-20));
}
