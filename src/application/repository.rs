//! Storage keys and session persistence helpers.
//!
//! All records live in the key-value port as JSON strings:
//!
//! - `session_<CODE>` - the session record
//! - `user_sessions_<email>` - codes owned by an email, append-only,
//!   deduplicated on insert (email lowercased)
//! - `verification_<email>` - pending password-reset code (email lowercased)

use crate::domain::foundation::SessionCode;
use crate::domain::session::{Session, SessionError};
use crate::ports::KeyValueStore;

/// Prefix shared by all session records; supports the email scan.
pub const SESSION_KEY_PREFIX: &str = "session_";

pub fn session_key(code: &SessionCode) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, code)
}

pub fn email_index_key(email: &str) -> String {
    format!("user_sessions_{}", email.to_lowercase())
}

pub fn verification_key(email: &str) -> String {
    format!("verification_{}", email.to_lowercase())
}

/// Loads a session by code.
///
/// # Errors
///
/// - `NotFound` when no record exists under the code
/// - `Storage` when the record cannot be read or parsed
pub(crate) async fn load_session(
    store: &dyn KeyValueStore,
    code: &SessionCode,
) -> Result<Session, SessionError> {
    let key = session_key(code);
    let raw = store
        .get(&key)
        .await?
        .ok_or_else(|| SessionError::not_found(code.clone()))?;
    serde_json::from_str(&raw)
        .map_err(|e| SessionError::storage(format!("corrupt record '{}': {}", key, e)))
}

/// Persists a session and, when it carries an email, registers its code in
/// that email's session index.
///
/// Whole-record replacement: concurrent writers resolve as last-write-wins.
pub(crate) async fn save_session(
    store: &dyn KeyValueStore,
    session: &Session,
) -> Result<(), SessionError> {
    let key = session_key(session.code());
    let json = serde_json::to_string(session)
        .map_err(|e| SessionError::storage(format!("serialize '{}': {}", key, e)))?;
    store.set(&key, json).await?;

    if let Some(email) = session.user_email() {
        index_session(store, email, session.code()).await?;
    }
    Ok(())
}

/// Appends a code to an email's session index unless already present.
async fn index_session(
    store: &dyn KeyValueStore,
    email: &str,
    code: &SessionCode,
) -> Result<(), SessionError> {
    let key = email_index_key(email);
    let mut codes: Vec<SessionCode> = match store.get(&key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| SessionError::storage(format!("corrupt record '{}': {}", key, e)))?,
        None => Vec::new(),
    };
    if !codes.contains(code) {
        codes.push(code.clone());
        let json = serde_json::to_string(&codes)
            .map_err(|e| SessionError::storage(format!("serialize '{}': {}", key, e)))?;
        store.set(&key, json).await?;
    }
    Ok(())
}

/// Reads an email's session index; absent means empty.
pub(crate) async fn load_email_index(
    store: &dyn KeyValueStore,
    email: &str,
) -> Result<Vec<SessionCode>, SessionError> {
    let key = email_index_key(email);
    match store.get(&key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| SessionError::storage(format!("corrupt record '{}': {}", key, e))),
        None => Ok(Vec::new()),
    }
}
