//! Driven port for issuing and verifying session tokens.

use chrono::{DateTime, Utc};

use crate::domain::{SessionClaims, SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by session token adapters.
    pub enum SessionTokenError {
        /// The token could not be signed.
        Signing { message: String } => "session token signing failed: {message}",
        /// The token is malformed, tampered with or signed by another key.
        Invalid { message: String } => "session token rejected: {message}",
        /// The token expired before `now`.
        Expired => "session token expired",
    }
}

/// Stateless signed session credentials.
///
/// Verification depends only on the token, the signing key and `now`.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokens: Send + Sync {
    /// Issue a token for `user_id` valid from `now`.
    fn issue(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<SessionToken, SessionTokenError>;

    /// Verify `token` as of `now`.
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, SessionTokenError>;
}
