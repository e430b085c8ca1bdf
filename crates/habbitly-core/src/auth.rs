//! Demo login session handling.
//!
//! Credentials come from [`AuthConfig`]; the logged-in flag is a row in
//! the kv table so it survives across invocations until `logout`.

use crate::error::DatabaseError;
use crate::storage::{AuthConfig, HabitDb};

const SESSION_KEY: &str = "session.logged_in";

/// Check credentials and mark the session as logged in.
///
/// Returns `false` (without touching the session) on a credential
/// mismatch.
///
/// # Errors
/// Returns an error if the session flag cannot be written.
pub fn login(
    db: &HabitDb,
    config: &AuthConfig,
    username: &str,
    password: &str,
) -> Result<bool, DatabaseError> {
    if username != config.username || password != config.password {
        return Ok(false);
    }
    db.kv_set(SESSION_KEY, "true")?;
    Ok(true)
}

/// Clear the session flag.
///
/// # Errors
/// Returns an error if the session flag cannot be deleted.
pub fn logout(db: &HabitDb) -> Result<(), DatabaseError> {
    db.kv_delete(SESSION_KEY)
}

/// Whether a session flag is currently set.
///
/// # Errors
/// Returns an error if the session flag cannot be read.
pub fn is_logged_in(db: &HabitDb) -> Result<bool, DatabaseError> {
    Ok(db.kv_get(SESSION_KEY)?.as_deref() == Some("true"))
}
