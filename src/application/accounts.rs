//! AccountService - password reset via emailed verification codes.
//!
//! The code itself is returned to the caller; actually delivering it by
//! email is an outer-layer concern.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::repository::{self, verification_key, SESSION_KEY_PREFIX};
use crate::config::AppConfig;
use crate::domain::credentials::{hash_password, VerificationCode};
use crate::domain::foundation::Timestamp;
use crate::domain::session::{Session, SessionError};
use crate::ports::KeyValueStore;

/// Service for account recovery on email-registered sessions.
pub struct AccountService {
    store: Arc<dyn KeyValueStore>,
    config: AppConfig,
}

impl AccountService {
    pub fn new(store: Arc<dyn KeyValueStore>, config: AppConfig) -> Self {
        Self { store, config }
    }

    /// Issues a fresh verification code for the email, replacing any code
    /// already outstanding.
    ///
    /// # Errors
    ///
    /// - `EmailNotFound` when no stored session is registered to the email
    pub async fn request_reset(&self, email: &str) -> Result<String, SessionError> {
        if self.find_session_by_email(email).await?.is_none() {
            return Err(SessionError::EmailNotFound(email.to_string()));
        }

        let code = VerificationCode::generate(
            &mut rand::thread_rng(),
            &Timestamp::now(),
            self.config.auth.code_ttl_minutes,
        );
        let serialized = serde_json::to_string(&code)
            .map_err(|e| SessionError::storage(format!("serialize verification code: {}", e)))?;
        self.store
            .set(&verification_key(email), serialized)
            .await?;
        info!(email, "verification code issued");
        Ok(code.code().to_string())
    }

    /// Checks a user-supplied code against the outstanding one.
    ///
    /// Returns `Ok(false)` when no code is outstanding or it does not match.
    /// A matching code stays stored so the subsequent reset can proceed.
    ///
    /// # Errors
    ///
    /// - `CodeInvalidOrExpired` when the stored code has expired; the stale
    ///   record is deleted
    pub async fn verify_code(&self, email: &str, candidate: &str) -> Result<bool, SessionError> {
        let key = verification_key(email);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(false);
        };
        let code: VerificationCode = match serde_json::from_str(&raw) {
            Ok(code) => code,
            Err(e) => {
                warn!(email, error = %e, "corrupt verification record, discarding");
                self.store.delete(&key).await?;
                return Ok(false);
            }
        };
        if code.is_expired(&Timestamp::now()) {
            self.store.delete(&key).await?;
            return Err(SessionError::CodeInvalidOrExpired);
        }
        Ok(code.matches(candidate))
    }

    /// Deletes any outstanding code for the email. Idempotent.
    pub async fn clear_code(&self, email: &str) -> Result<(), SessionError> {
        self.store.delete(&verification_key(email)).await?;
        Ok(())
    }

    /// Replaces the password digest on every session registered to the
    /// email, then consumes the outstanding verification code.
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> Result<(), SessionError> {
        let min = self.config.auth.min_password_length;
        if new_password.len() < min {
            return Err(SessionError::validation(
                "password",
                format!("Password must be at least {} characters", min),
            ));
        }

        let codes = repository::load_email_index(self.store.as_ref(), email).await?;
        let mut updated = 0usize;
        for code in codes {
            match repository::load_session(self.store.as_ref(), &code).await {
                Ok(mut session) => {
                    session.set_password_hash(hash_password(new_password));
                    repository::save_session(self.store.as_ref(), &session).await?;
                    updated += 1;
                }
                Err(SessionError::NotFound(_)) => {
                    warn!(code = %code, "indexed session record is missing");
                }
                Err(other) => return Err(other),
            }
        }
        if updated == 0 {
            return Err(SessionError::EmailNotFound(email.to_string()));
        }

        self.clear_code(email).await?;
        info!(email, sessions = updated, "password reset");
        Ok(())
    }

    /// Scans stored sessions for one registered to the email. Corrupt
    /// records are skipped rather than failing the lookup.
    async fn find_session_by_email(&self, email: &str) -> Result<Option<Session>, SessionError> {
        let needle = email.to_lowercase();
        for key in self.store.keys(SESSION_KEY_PREFIX).await? {
            let Some(raw) = self.store.get(&key).await? else {
                continue;
            };
            match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    if session
                        .user_email()
                        .is_some_and(|e| e.to_lowercase() == needle)
                    {
                        return Ok(Some(session));
                    }
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping corrupt session record");
                }
            }
        }
        Ok(None)
    }
}
