//! Session key fingerprinting for operational visibility.
//!
//! Provides a truncated SHA-256 fingerprint of the session signing key so
//! operators can tell which key is active without exposing the key material.
//! The fingerprint is logged on startup.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Generate a truncated SHA-256 fingerprint of the key bytes.
///
/// Returns the first 8 bytes of the SHA-256 hash as a 16-character lowercase
/// hex string.
///
/// # Examples
///
/// ```rust
/// use blog_backend::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&[b'a'; 32]);
///
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &[u8]) -> String {
    let digest = Sha256::digest(key);
    hex::encode(digest.iter().take(FINGERPRINT_BYTES).copied().collect::<Vec<u8>>())
}
