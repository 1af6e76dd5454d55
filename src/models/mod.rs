mod budget;
mod period;
mod report;
mod transaction;
mod user;

pub use budget::{Alert, Budget, BudgetOutcome, BudgetStatus};
pub use period::{month_key, parse_month, year_key};
pub use report::{PeriodTotals, Report};
pub use transaction::{Transaction, TransactionKind};
pub use user::{Session, User};
