//! Argon2id implementation of [`PasswordHasher`].

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Argon2id hasher producing PHC strings.
///
/// # Examples
/// ```
/// use blog_backend::domain::ports::PasswordHasher;
/// use blog_backend::outbound::security::Argon2PasswordHasher;
///
/// let hasher = Argon2PasswordHasher::default();
/// let hash = hasher.hash("password").unwrap();
/// assert!(hasher.verify("password", &hash).unwrap());
/// assert!(!hasher.verify("wrong", &hash).unwrap());
/// ```
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Use explicit cost parameters.
    ///
    /// # Errors
    /// Fails when the parameters are outside Argon2's accepted ranges.
    pub fn with_cost(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHasherError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordHash::new(hash.to_string()))
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::malformed_hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_cost(1024, 1, 1).expect("valid cost")
    }

    #[rstest]
    fn hashes_are_salted(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("password").expect("hash");
        let second = hasher.hash("password").expect("hash");
        assert_ne!(first, second);
        assert!(first.as_str().starts_with("$argon2id$"));
    }

    #[rstest]
    #[case("password", true)]
    #[case("Password", false)]
    #[case("", false)]
    fn verify_matches_only_the_original(
        hasher: Argon2PasswordHasher,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        let hash = hasher.hash("password").expect("hash");
        assert_eq!(hasher.verify(candidate, &hash).expect("verify"), expected);
    }

    #[rstest]
    fn malformed_hashes_are_errors(hasher: Argon2PasswordHasher) {
        let error = hasher
            .verify("password", &PasswordHash::new("plain-text"))
            .expect_err("malformed");
        assert!(matches!(error, PasswordHasherError::MalformedHash { .. }));
    }

    #[rstest]
    fn invalid_cost_is_rejected() {
        assert!(Argon2PasswordHasher::with_cost(1, 0, 0).is_err());
    }
}
