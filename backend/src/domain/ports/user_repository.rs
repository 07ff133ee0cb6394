//! Driven port for account persistence.

use async_trait::async_trait;

use crate::domain::{UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique email constraint rejected the insert.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Storage for accounts keyed by id and by normalised email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Fails with [`UserRepositoryError::DuplicateEmail`] when the email is
    /// already taken, even if a concurrent insert won the race.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserRepositoryError>;

    /// Fetch an account by normalised email.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<UserAccount>, UserRepositoryError>;

    /// Remove an account. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError>;
}
