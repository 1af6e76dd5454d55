use anyhow::{Context, Result};

use crate::db::Database;
use crate::models::{Session, User};

/// Create a user. A taken username fails with `LedgerError::UsernameTaken`
/// and leaves the existing account untouched.
pub(crate) fn register(db: &Database, username: &str, password: &str) -> Result<i64> {
    let user = User::new(username.trim().to_string(), password.to_string());
    let id = db.insert_user(&user)?;
    tracing::info!(user_id = id, username = %user.username, "registered user");
    Ok(id)
}

/// Start a session when the credentials match exactly.
pub(crate) fn login(db: &Database, username: &str, password: &str) -> Result<Option<Session>> {
    let Some(user) = db.find_user(username.trim(), password)? else {
        tracing::debug!(username = %username.trim(), "login rejected");
        return Ok(None);
    };
    let user_id = user.id.context("Stored user has no ID")?;
    tracing::info!(user_id, username = %user.username, "logged in");
    Ok(Some(Session {
        user_id,
        username: user.username,
    }))
}
