use anyhow::{Context, Result};
use std::path::Path;

use crate::db::Database;
use crate::ledger;
use crate::models::Session;

/// Write the session user's transactions (newest first) to a CSV file.
/// Returns the number of rows written, excluding the header.
pub(crate) fn export_transactions_csv(
    db: &Database,
    session: &Session,
    path: &Path,
    month: Option<&str>,
) -> Result<usize> {
    let txns = ledger::history(db, session, month)?;

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    wtr.write_record(["id", "date", "category", "kind", "amount"])?;
    for txn in &txns {
        wtr.write_record([
            txn.id.unwrap_or_default().to_string(),
            txn.created_at.clone(),
            txn.category.clone(),
            txn.kind.to_string(),
            txn.amount.to_string(),
        ])?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    tracing::info!(user_id = session.user_id, rows = txns.len(), path = %path.display(), "exported transactions");
    Ok(txns.len())
}

#[cfg(test)]
mod tests;
