//! Credential helpers: password digests and verification codes.
//!
//! The password digest is an unsalted SHA-256 hex string. That is a
//! deterrent against casual snooping in shared storage, not a security
//! boundary: anyone with the stored record can run a dictionary attack.
//! A deployment with real stakes needs a salted, iterated KDF and
//! server-side verification.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::domain::foundation::Timestamp;

/// Verification codes are valid for this many minutes by default.
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 15;

/// Computes the unsalted SHA-256 hex digest of a password.
pub fn hash_password(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Recomputes the digest and compares in constant time.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    let computed = hash_password(plaintext);
    computed.as_bytes().ct_eq(digest.as_bytes()).into()
}

/// A time-boxed password-reset code, persisted keyed by lowercased email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    code: String,
    /// Absolute expiry, Unix milliseconds.
    expires_at_ms: i64,
}

impl VerificationCode {
    /// Generates a six-digit numeric code, uniform in [100000, 999999],
    /// expiring `ttl_minutes` after `now`.
    pub fn generate<R: Rng>(rng: &mut R, now: &Timestamp, ttl_minutes: i64) -> Self {
        let code = rng.gen_range(100_000..=999_999).to_string();
        Self {
            code,
            expires_at_ms: now.add_minutes(ttl_minutes).as_unix_millis(),
        }
    }

    /// The six-digit code as shown to the user.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// True once `now` has passed the absolute expiry.
    pub fn is_expired(&self, now: &Timestamp) -> bool {
        now.as_unix_millis() > self.expires_at_ms
    }

    /// Constant-time comparison against a user-supplied code.
    ///
    /// Expiry is the caller's concern: an expired code must be rejected and
    /// deleted before this comparison matters.
    pub fn matches(&self, candidate: &str) -> bool {
        self.code.as_bytes().ct_eq(candidate.trim().as_bytes()).into()
    }
}
