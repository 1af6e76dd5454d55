use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::db::Database;
use crate::models::{month_key, Alert, Budget, BudgetOutcome, BudgetStatus, Session};

/// Set the limit for `category` in the month containing `now`.
///
/// Re-setting the same scope overwrites the stored limit, so repeating a
/// call converges on the same state. Negative limits are stored as given.
pub(crate) fn set_budget(
    db: &Database,
    session: &Session,
    category: &str,
    limit: Decimal,
    now: NaiveDateTime,
) -> Result<BudgetOutcome> {
    let month = month_key(now);
    let budget = Budget::new(session.user_id, category.to_string(), month, limit);
    let outcome = db.upsert_budget(&budget)?;
    tracing::info!(
        user_id = session.user_id,
        category,
        month = %budget.month,
        %limit,
        %outcome,
        "budget set"
    );
    Ok(outcome)
}

/// Compare this month's expenses for `category` against its budget.
///
/// Yields an alert only when spending is strictly over the limit. With no
/// budget configured nothing is summed and `None` is returned.
pub(crate) fn evaluate_spend(
    db: &Database,
    session: &Session,
    category: &str,
    now: NaiveDateTime,
) -> Result<Option<Alert>> {
    let month = month_key(now);
    let Some(budget) = db.get_budget(session.user_id, category, &month)? else {
        tracing::debug!(user_id = session.user_id, category, %month, "no budget configured");
        return Ok(None);
    };

    let spent = db.get_category_spending(session.user_id, category, &month)?;
    if spent > budget.limit_amount {
        tracing::warn!(
            user_id = session.user_id,
            category,
            limit = %budget.limit_amount,
            %spent,
            "budget exceeded"
        );
        return Ok(Some(Alert {
            category: budget.category,
            limit: budget.limit_amount,
            spent,
        }));
    }
    Ok(None)
}

/// Every budget for the month containing `now`, with spending so far.
pub(crate) fn budget_status(
    db: &Database,
    session: &Session,
    now: NaiveDateTime,
) -> Result<Vec<BudgetStatus>> {
    let month = month_key(now);
    db.get_budgets(session.user_id, &month)?
        .into_iter()
        .map(|budget| {
            let spent = db.get_category_spending(session.user_id, &budget.category, &month)?;
            Ok(BudgetStatus {
                category: budget.category,
                limit: budget.limit_amount,
                spent,
            })
        })
        .collect()
}
