mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, ErrorCode, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::models::*;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::debug!(version = schema::CURRENT_VERSION, "created schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(
                from = current,
                to = schema::CURRENT_VERSION,
                "migrated schema"
            );
        }

        Ok(())
    }

    // ── Users ─────────────────────────────────────────────────

    pub(crate) fn insert_user(&self, user: &User) -> Result<i64> {
        let result = self.conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![user.username, user.password],
        );
        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(LedgerError::UsernameTaken(user.username.clone()).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Exact match on both username and password.
    pub(crate) fn find_user(&self, username: &str, password: &str) -> Result<Option<User>> {
        let result = self.conn.query_row(
            "SELECT id, username, password FROM users WHERE username = ?1 AND password = ?2",
            params![username, password],
            |row| {
                Ok(User {
                    id: Some(row.get(0)?),
                    username: row.get(1)?,
                    password: row.get(2)?,
                })
            },
        );
        match result {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions (user_id, amount, category, kind, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                txn.user_id,
                txn.amount.to_string(),
                txn.category,
                txn.kind.as_str(),
                txn.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// A user's transactions, newest first. `month` is a "YYYY-MM" prefix.
    pub(crate) fn get_transactions(
        &self,
        user_id: i64,
        month: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        let pattern = format!("{}%", month.unwrap_or(""));
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, amount, category, kind, created_at
             FROM transactions
             WHERE user_id = ?1 AND created_at LIKE ?2
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![user_id, pattern], |row| {
            Ok(Transaction {
                id: Some(row.get(0)?),
                user_id: row.get(1)?,
                amount: decimal_column(row, 2)?,
                category: row.get(3)?,
                kind: kind_column(row, 4)?,
                created_at: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction_count(&self, user_id: i64) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?)
    }

    /// Income and expense sums for timestamps starting with `period`
    /// ("YYYY" for a year, "YYYY-MM" for a month).
    pub(crate) fn get_period_totals(&self, user_id: i64, period: &str) -> Result<PeriodTotals> {
        let mut stmt = self.conn.prepare(
            "SELECT kind, amount FROM transactions
             WHERE user_id = ?1 AND created_at LIKE ?2",
        )?;
        let rows = stmt.query_map(params![user_id, format!("{period}%")], |row| {
            Ok((kind_column(row, 0)?, decimal_column(row, 1)?))
        })?;

        let mut totals = PeriodTotals::default();
        for row in rows {
            let (kind, amount) = row?;
            totals.add(kind, amount);
        }
        Ok(totals)
    }

    /// Sum of Expense amounts for one category within a "YYYY-MM" month.
    pub(crate) fn get_category_spending(
        &self,
        user_id: i64,
        category: &str,
        month: &str,
    ) -> Result<Decimal> {
        let mut stmt = self.conn.prepare(
            "SELECT amount FROM transactions
             WHERE user_id = ?1 AND category = ?2 AND kind = 'Expense' AND created_at LIKE ?3",
        )?;
        let rows = stmt.query_map(params![user_id, category, format!("{month}%")], |row| {
            decimal_column(row, 0)
        })?;

        let mut total = Decimal::ZERO;
        for amount in rows {
            total += amount?;
        }
        Ok(total)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn get_budget(
        &self,
        user_id: i64,
        category: &str,
        month: &str,
    ) -> Result<Option<Budget>> {
        let result = self.conn.query_row(
            "SELECT id, user_id, category, month_year, limit_amount FROM budgets
             WHERE user_id = ?1 AND category = ?2 AND month_year = ?3",
            params![user_id, category, month],
            budget_row,
        );
        match result {
            Ok(b) => Ok(Some(b)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn get_budgets(&self, user_id: i64, month: &str) -> Result<Vec<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, category, month_year, limit_amount FROM budgets
             WHERE user_id = ?1 AND month_year = ?2
             ORDER BY category",
        )?;
        let rows = stmt.query_map(params![user_id, month], budget_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Insert the budget, or overwrite the limit of the one already
    /// stored for the same (user, category, month).
    pub(crate) fn upsert_budget(&self, budget: &Budget) -> Result<BudgetOutcome> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM budgets WHERE user_id = ?1 AND category = ?2 AND month_year = ?3)",
            params![budget.user_id, budget.category, budget.month],
            |row| row.get(0),
        )?;
        self.conn.execute(
            "INSERT INTO budgets (user_id, category, limit_amount, month_year)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, category, month_year) DO UPDATE SET limit_amount = excluded.limit_amount",
            params![
                budget.user_id,
                budget.category,
                budget.limit_amount.to_string(),
                budget.month,
            ],
        )?;
        Ok(if exists {
            BudgetOutcome::Updated
        } else {
            BudgetOutcome::Created
        })
    }

    #[cfg(test)]
    pub(crate) fn count_budgets(&self, user_id: i64, category: &str, month: &str) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM budgets WHERE user_id = ?1 AND category = ?2 AND month_year = ?3",
            params![user_id, category, month],
            |row| row.get(0),
        )?)
    }

    #[cfg(test)]
    pub(crate) fn execute_raw(&self, sql: &str) -> Result<usize> {
        Ok(self.conn.execute(sql, [])?)
    }
}

fn budget_row(row: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: Some(row.get(0)?),
        user_id: row.get(1)?,
        category: row.get(2)?,
        month: row.get(3)?,
        limit_amount: decimal_column(row, 4)?,
    })
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(text.trim()).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn kind_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<TransactionKind> {
    let text: String = row.get(idx)?;
    TransactionKind::from_str(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
