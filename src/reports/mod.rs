use anyhow::Result;
use chrono::NaiveDateTime;

use crate::db::Database;
use crate::models::{month_key, year_key, Report, Session};

/// Income and expense totals for the calendar month and calendar year
/// containing `now`. Read-only.
pub(crate) fn generate_reports(
    db: &Database,
    session: &Session,
    now: NaiveDateTime,
) -> Result<Report> {
    let month = month_key(now);
    let year = year_key(now);
    let monthly = db.get_period_totals(session.user_id, &month)?;
    let yearly = db.get_period_totals(session.user_id, &year)?;
    tracing::debug!(user_id = session.user_id, %month, %year, "generated reports");
    Ok(Report {
        month,
        year,
        monthly,
        yearly,
    })
}

#[cfg(test)]
mod tests;
