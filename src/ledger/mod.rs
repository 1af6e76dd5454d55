use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::budget;
use crate::db::Database;
use crate::models::{Alert, Session, Transaction, TransactionKind};

/// Record a transaction stamped `now`, then check the category's budget.
///
/// The check runs after every successful insert whatever the kind; only
/// expenses count towards spending.
pub(crate) fn add_transaction(
    db: &Database,
    session: &Session,
    amount: Decimal,
    category: &str,
    kind: TransactionKind,
    now: NaiveDateTime,
) -> Result<Option<Alert>> {
    let txn = Transaction::new(session.user_id, amount, category.to_string(), kind, now);
    let id = db.insert_transaction(&txn)?;
    tracing::debug!(
        user_id = session.user_id,
        transaction_id = id,
        %kind,
        %amount,
        category,
        "transaction added"
    );
    budget::evaluate_spend(db, session, category, now)
}

/// The session user's transactions, newest first, optionally for one
/// "YYYY-MM" month.
pub(crate) fn history(
    db: &Database,
    session: &Session,
    month: Option<&str>,
) -> Result<Vec<Transaction>> {
    db.get_transactions(session.user_id, month)
}

#[cfg(test)]
mod tests;
