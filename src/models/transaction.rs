use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::period::TIMESTAMP_FORMAT;
use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub fn all() -> &'static [TransactionKind] {
        &[Self::Income, Self::Expense]
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    /// Case-insensitive; anything other than income/expense is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(LedgerError::InvalidKind(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub user_id: i64,
    pub amount: Decimal,
    pub category: String,
    pub kind: TransactionKind,
    /// Format: "YYYY-MM-DD HH:MM:SS"
    pub created_at: String,
}

impl Transaction {
    pub fn new(
        user_id: i64,
        amount: Decimal,
        category: String,
        kind: TransactionKind,
        at: NaiveDateTime,
    ) -> Self {
        Self {
            id: None,
            user_id,
            amount,
            category,
            kind,
            created_at: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// The "YYYY-MM-DD" part of the timestamp.
    pub fn date(&self) -> &str {
        self.created_at.get(..10).unwrap_or(&self.created_at)
    }
}
