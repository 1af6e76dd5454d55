use thiserror::Error;

/// Domain failures a caller is expected to tell apart.
///
/// These travel inside `anyhow::Error`; recover them with
/// `err.downcast_ref::<LedgerError>()`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Invalid transaction kind '{0}' (expected Income or Expense)")]
    InvalidKind(String),

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Invalid month '{0}' (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("Not logged in (pass --user <name> --password <password>)")]
    NotLoggedIn,
}

/// True when `err` carries the given domain error.
#[cfg(test)]
pub(crate) fn is(err: &anyhow::Error, expected: &LedgerError) -> bool {
    err.downcast_ref::<LedgerError>() == Some(expected)
}
