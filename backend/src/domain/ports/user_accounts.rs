//! Driving port for account use-cases.
//!
//! Inbound adapters call this port to register, sign in and manage the
//! signed-in account without knowing which stores back it.

use async_trait::async_trait;

use crate::domain::{
    AuthenticatedUser, DeletionConfirmation, Error, LoginCredentials, Registration, User, UserId,
};

/// Account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Create an account and sign it in.
    ///
    /// # Errors
    /// `Conflict` when the email is already registered.
    async fn register(&self, registration: Registration) -> Result<AuthenticatedUser, Error>;

    /// Sign in with email and password.
    ///
    /// # Errors
    /// `NotFound` for an unknown email; `InvalidCredentials` for a wrong
    /// password.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthenticatedUser, Error>;

    /// Profile of the signed-in user.
    ///
    /// # Errors
    /// `NotFound` when the account no longer exists.
    async fn get_self(&self, user_id: &UserId) -> Result<User, Error>;

    /// Delete the signed-in account after re-checking its credentials.
    ///
    /// The email is compared before the password.
    ///
    /// # Errors
    /// `NotFound` when the account vanished or the email does not match;
    /// `InvalidCredentials` for a blank or wrong password.
    async fn delete_self(
        &self,
        user_id: &UserId,
        confirmation: DeletionConfirmation,
    ) -> Result<(), Error>;

    /// Resolve a bearer token to the user it was issued to.
    ///
    /// Invalid or expired tokens resolve to `None`.
    fn session_user(&self, token: &str) -> Option<UserId>;
}
