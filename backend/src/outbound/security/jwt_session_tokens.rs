//! HS256 JWT implementation of [`SessionTokens`].
//!
//! Expiry is checked against the caller-supplied `now` rather than the system
//! clock, so verification is a pure function of token, key and time.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{SessionTokenError, SessionTokens};
use crate::domain::{SessionClaims, SessionToken, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct JwtSessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtSessionTokens {
    /// Build a signer from raw key bytes and a token lifetime.
    #[must_use]
    pub fn new(key: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            ttl,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);
        validation
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, SessionTokenError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| SessionTokenError::invalid(format!("timestamp {seconds} out of range")))
}

impl SessionTokens for JwtSessionTokens {
    fn issue(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<SessionToken, SessionTokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(SessionToken::new)
            .map_err(|err| SessionTokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, SessionTokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Self::validation())
            .map_err(|err| SessionTokenError::invalid(err.to_string()))?;
        let Claims { sub, iat, exp } = data.claims;

        if exp <= now.timestamp() {
            return Err(SessionTokenError::expired());
        }
        let user_id =
            UserId::new(&sub).map_err(|err| SessionTokenError::invalid(err.to_string()))?;
        Ok(SessionClaims {
            user_id,
            issued_at: timestamp(iat)?,
            expires_at: timestamp(exp)?,
        })
    }
}
