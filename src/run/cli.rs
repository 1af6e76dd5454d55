use anyhow::Result;
use chrono::NaiveDateTime;
use std::io::Write;
use std::path::PathBuf;

use super::util::{format_amount, parse_amount, write_budget_status, write_history, write_report};
use crate::db::Database;
use crate::error::LedgerError;
use crate::models::{month_key, parse_month, Session, TransactionKind};
use crate::{auth, budget, export, ledger, reports};

pub(crate) fn as_cli(
    args: &[String],
    db: &Database,
    out: &mut impl Write,
    now: NaiveDateTime,
) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "register" => cli_register(rest, db, out),
        "add" => cli_add(rest, db, out, now),
        "report" | "r" => cli_report(rest, db, out, now),
        "budget" => cli_budget(rest, db, out, now),
        "budgets" => cli_budgets(rest, db, out, now),
        "history" => cli_history(rest, db, out),
        "export" => cli_export(rest, db, out, now),
        "--help" | "-h" | "help" => {
            print_usage(out)?;
            Ok(())
        }
        "--version" | "-V" | "version" => {
            writeln!(out, "fintrack {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "fintrack - personal finance tracker")?;
    writeln!(out)?;
    writeln!(out, "Usage: fintrack [command]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  (none)                          Interactive menu")?;
    writeln!(out, "  register <user> <password>      Create a user")?;
    writeln!(out, "  add <amount> <category> <kind>  Record an Income or Expense")?;
    writeln!(out, "  report                          Monthly and yearly totals")?;
    writeln!(out, "  budget <category> <limit>       Set this month's limit for a category")?;
    writeln!(out, "  budgets                         This month's budgets and spending")?;
    writeln!(out, "  history                         List transactions")?;
    writeln!(out, "    --month <YYYY-MM>             Only one month")?;
    writeln!(out, "  export [path]                   Export transactions to CSV")?;
    writeln!(out, "    --month <YYYY-MM>             Only one month")?;
    writeln!(out, "  --help, -h                      Show this help")?;
    writeln!(out, "  --version, -V                   Show version")?;
    writeln!(out)?;
    writeln!(out, "Every command except register needs --user <name> --password <password>.")
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither a `--flag` nor a flag's value.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut found = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            found.push(arg.as_str());
        }
    }
    found
}

fn month_flag(args: &[String]) -> Result<Option<String>> {
    Ok(flag(args, "--month").map(parse_month).transpose()?)
}

fn require_session(args: &[String], db: &Database) -> Result<Session> {
    let username = flag(args, "--user").ok_or(LedgerError::NotLoggedIn)?;
    let password = flag(args, "--password").unwrap_or_default();
    auth::login(db, username, password)?
        .ok_or_else(|| anyhow::anyhow!("Invalid credentials for '{username}'"))
}

fn cli_register(args: &[String], db: &Database, out: &mut impl Write) -> Result<()> {
    let parts = positionals(args);
    let [username, password] = parts.as_slice() else {
        anyhow::bail!("Usage: fintrack register <user> <password>");
    };
    auth::register(db, username, password)?;
    writeln!(out, "User registered successfully!")?;
    Ok(())
}

fn cli_add(args: &[String], db: &Database, out: &mut impl Write, now: NaiveDateTime) -> Result<()> {
    let parts = positionals(args);
    let [amount, category, kind] = parts.as_slice() else {
        anyhow::bail!("Usage: fintrack add <amount> <category> <Income|Expense> --user <name> --password <pw>");
    };
    let amount = parse_amount(amount)?;
    let kind: TransactionKind = kind.parse()?;
    let session = require_session(args, db)?;

    let alert = ledger::add_transaction(db, &session, amount, category.trim(), kind, now)?;
    writeln!(out, "Transaction added successfully!")?;
    if let Some(alert) = alert {
        writeln!(out, "Alert: {alert}")?;
    }
    Ok(())
}

fn cli_report(args: &[String], db: &Database, out: &mut impl Write, now: NaiveDateTime) -> Result<()> {
    let session = require_session(args, db)?;
    let report = reports::generate_reports(db, &session, now)?;
    let txn_count = db.get_transaction_count(session.user_id)?;

    writeln!(out, "fintrack - {}", session.username)?;
    writeln!(out, "{}", "─".repeat(40))?;
    write_report(out, &report)?;
    writeln!(out, "Total Txns: {txn_count}")?;
    Ok(())
}

fn cli_budget(args: &[String], db: &Database, out: &mut impl Write, now: NaiveDateTime) -> Result<()> {
    let parts = positionals(args);
    let [category, limit] = parts.as_slice() else {
        anyhow::bail!("Usage: fintrack budget <category> <limit> --user <name> --password <pw>");
    };
    let limit = parse_amount(limit)?;
    let session = require_session(args, db)?;

    let category = category.trim();
    let outcome = budget::set_budget(db, &session, category, limit, now)?;
    writeln!(
        out,
        "Budget {outcome} for {category} ({}): {}",
        month_key(now),
        format_amount(limit)
    )?;
    Ok(())
}

fn cli_budgets(args: &[String], db: &Database, out: &mut impl Write, now: NaiveDateTime) -> Result<()> {
    let session = require_session(args, db)?;
    let rows = budget::budget_status(db, &session, now)?;
    writeln!(out, "Budgets for {}", month_key(now))?;
    write_budget_status(out, &rows)?;
    Ok(())
}

fn cli_history(args: &[String], db: &Database, out: &mut impl Write) -> Result<()> {
    let month = month_flag(args)?;
    let session = require_session(args, db)?;
    let txns = ledger::history(db, &session, month.as_deref())?;
    write_history(out, &txns)?;
    Ok(())
}

fn cli_export(args: &[String], db: &Database, out: &mut impl Write, now: NaiveDateTime) -> Result<()> {
    let month = month_flag(args)?;
    let session = require_session(args, db)?;

    let output_path = positionals(args)
        .first()
        .map(|p| PathBuf::from(shellexpand(p)))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            let suffix = month.clone().unwrap_or_else(|| month_key(now));
            PathBuf::from(format!("{home}/fintrack-export-{suffix}.csv"))
        });

    let count = export::export_transactions_csv(db, &session, &output_path, month.as_deref())?;
    if count == 0 {
        writeln!(out, "No transactions to export")?;
    } else {
        writeln!(out, "Exported {count} transactions to {}", output_path.display())?;
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
