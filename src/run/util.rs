use rust_decimal::Decimal;
use std::io::{self, Write};
use std::str::FromStr;

use crate::error::LedgerError;
use crate::models::{BudgetStatus, PeriodTotals, Report, Transaction, TransactionKind};

/// Format an amount as dollars with thousand separators, e.g. `-$1,234.50`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let formatted = format!("{:.2}", val.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${with_commas}.{dec_part}")
}

/// Cut `s` to at most `max` characters, ending in "…" when shortened.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let kept: String = s.chars().take(max - 1).collect();
    format!("{kept}…")
}

/// Parse a typed amount. Accepts "$" and thousand separators, and
/// "(12.00)" for negatives.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal, LedgerError> {
    let cleaned = s
        .trim()
        .replace(['$', ','], "")
        .replace('(', "-")
        .replace(')', "");
    if cleaned.is_empty() {
        return Err(LedgerError::InvalidAmount(s.trim().to_string()));
    }
    Decimal::from_str(&cleaned).map_err(|_| LedgerError::InvalidAmount(s.trim().to_string()))
}

// ── Text output shared by the shell and the CLI ──────────────

pub(crate) fn write_report(out: &mut impl Write, report: &Report) -> io::Result<()> {
    writeln!(out, "Monthly Report ({})", report.month)?;
    write_totals(out, &report.monthly)?;
    writeln!(out, "Yearly Report ({})", report.year)?;
    write_totals(out, &report.yearly)
}

fn write_totals(out: &mut impl Write, totals: &PeriodTotals) -> io::Result<()> {
    writeln!(out, "  Income:   {}", format_amount(totals.total(TransactionKind::Income)))?;
    writeln!(out, "  Expenses: {}", format_amount(totals.total(TransactionKind::Expense)))?;
    writeln!(out, "  Savings:  {}", format_amount(totals.savings()))
}

pub(crate) fn write_history(out: &mut impl Write, txns: &[Transaction]) -> io::Result<()> {
    if txns.is_empty() {
        return writeln!(out, "No transactions found.");
    }
    writeln!(
        out,
        "{:<12} {:<20} {:<8} {:>14}",
        "Date", "Category", "Type", "Amount"
    )?;
    writeln!(out, "{}", "─".repeat(57))?;
    for txn in txns {
        writeln!(
            out,
            "{:<12} {:<20} {:<8} {:>14}",
            txn.date(),
            truncate(&txn.category, 20),
            txn.kind.as_str(),
            format_amount(txn.amount),
        )?;
    }
    Ok(())
}

pub(crate) fn write_budget_status(out: &mut impl Write, rows: &[BudgetStatus]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No budgets set for this month.");
    }
    writeln!(
        out,
        "{:<20} {:>14} {:>14} {:>14}",
        "Category", "Budget", "Spent", "Remaining"
    )?;
    writeln!(out, "{}", "─".repeat(65))?;
    for row in rows {
        let flag = if row.is_exceeded() { "  OVER" } else { "" };
        writeln!(
            out,
            "{:<20} {:>14} {:>14} {:>14}{flag}",
            truncate(&row.category, 20),
            format_amount(row.limit),
            format_amount(row.spent),
            format_amount(row.remaining()),
        )?;
    }
    Ok(())
}
