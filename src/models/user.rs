#[derive(Debug, Clone)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    /// Stored and compared as an opaque string.
    pub password: String,
}

impl User {
    pub fn new(username: String, password: String) -> Self {
        Self {
            id: None,
            username,
            password,
        }
    }
}

/// The authenticated identity every ledger operation runs as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
}
