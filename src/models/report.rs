use rust_decimal::Decimal;

use super::TransactionKind;

/// Summed amounts per kind over one time window. Kinds with no
/// transactions read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl PeriodTotals {
    pub fn total(&self, kind: TransactionKind) -> Decimal {
        match kind {
            TransactionKind::Income => self.income,
            TransactionKind::Expense => self.expense,
        }
    }

    pub fn add(&mut self, kind: TransactionKind, amount: Decimal) {
        match kind {
            TransactionKind::Income => self.income += amount,
            TransactionKind::Expense => self.expense += amount,
        }
    }

    pub fn savings(&self) -> Decimal {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Format: "YYYY-MM"
    pub month: String,
    /// Format: "YYYY"
    pub year: String,
    pub monthly: PeriodTotals,
    pub yearly: PeriodTotals,
}
