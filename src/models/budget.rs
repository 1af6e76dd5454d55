use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: Option<i64>,
    pub user_id: i64,
    pub category: String,
    /// Format: "YYYY-MM"
    pub month: String,
    pub limit_amount: Decimal,
}

impl Budget {
    pub fn new(user_id: i64, category: String, month: String, limit_amount: Decimal) -> Self {
        Self {
            id: None,
            user_id,
            category,
            month,
            limit_amount,
        }
    }
}

/// What a budget "set" did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetOutcome {
    Created,
    Updated,
}

impl BudgetOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

impl std::fmt::Display for BudgetOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current-month expense for a category went over its limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You have exceeded your budget for {}! Budget: {}, Spent: {}",
            self.category, self.limit, self.spent
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
}

impl BudgetStatus {
    pub fn remaining(&self) -> Decimal {
        self.limit - self.spent
    }

    pub fn is_exceeded(&self) -> bool {
        self.spent > self.limit
    }
}
