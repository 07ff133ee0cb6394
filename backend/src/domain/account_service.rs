//! Account domain service.
//!
//! Implements [`UserAccounts`] on top of the user repository, the password
//! hasher and the session token signer.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    PasswordHasher, PasswordHasherError, SessionTokenError, SessionTokens, UserAccounts,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    AuthenticatedUser, DeletionConfirmation, Error, LoginCredentials, PasswordHash, Registration,
    User, UserAccount, UserId,
};

/// Account service implementing the [`UserAccounts`] driving port.
#[derive(Clone)]
pub struct AccountService<R, H, T> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<R, H, T> AccountService<R, H, T> {
    /// Create a new service over the given adapters.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<R, H, T> AccountService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    T: SessionTokens,
{
    fn map_user_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserRepositoryError::DuplicateEmail { email } => Self::duplicate_email(&email),
        }
    }

    fn map_hasher_error(error: PasswordHasherError) -> Error {
        Error::internal(error.to_string())
    }

    fn map_token_error(error: SessionTokenError) -> Error {
        Error::internal(error.to_string())
    }

    fn duplicate_email(email: &str) -> Error {
        Error::conflict("user already exists").with_details(json!({
            "field": "email",
            "value": email,
        }))
    }

    fn unknown_user() -> Error {
        Error::not_found("user not found")
    }

    async fn run_hasher<F, O>(&self, job: F) -> Result<O, Error>
    where
        F: FnOnce(&H) -> Result<O, PasswordHasherError> + Send + 'static,
        O: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || job(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(Self::map_hasher_error)
    }

    async fn password_matches(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, Error> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.clone();
        self.run_hasher(move |hasher| hasher.verify(password.as_str(), &hash))
            .await
    }

    fn sign_in(&self, user: User) -> Result<AuthenticatedUser, Error> {
        let token = self
            .tokens
            .issue(user.id(), self.clock.utc())
            .map_err(Self::map_token_error)?;
        Ok(AuthenticatedUser { user, token })
    }

    async fn load(&self, user_id: &UserId) -> Result<UserAccount, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(Self::unknown_user)
    }
}

#[async_trait]
impl<R, H, T> UserAccounts for AccountService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    T: SessionTokens,
{
    async fn register(&self, registration: Registration) -> Result<AuthenticatedUser, Error> {
        let email = registration.email().clone();
        if self
            .users
            .find_by_email(email.as_ref())
            .await
            .map_err(Self::map_user_error)?
            .is_some()
        {
            info!(email = %email, "registration rejected: email already registered");
            return Err(Self::duplicate_email(email.as_ref()));
        }

        let password = Zeroizing::new(registration.password().to_owned());
        let hash = self
            .run_hasher(move |hasher| hasher.hash(password.as_str()))
            .await?;

        let user = User::new(
            UserId::random(),
            email,
            registration.full_name().clone(),
            registration.avatar_url().cloned(),
            self.clock.utc(),
        );
        let account = UserAccount::new(user, hash);
        self.users
            .insert(&account)
            .await
            .map_err(Self::map_user_error)?;

        info!(user_id = %account.user().id(), "registered user");
        self.sign_in(account.into_user())
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthenticatedUser, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(Self::unknown_user)?;

        if !self
            .password_matches(credentials.password(), account.password_hash())
            .await?
        {
            warn!(user_id = %account.user().id(), "login rejected: wrong password");
            return Err(Error::invalid_credentials("invalid email or password"));
        }

        debug!(user_id = %account.user().id(), "user signed in");
        self.sign_in(account.into_user())
    }

    async fn get_self(&self, user_id: &UserId) -> Result<User, Error> {
        self.load(user_id).await.map(UserAccount::into_user)
    }

    async fn delete_self(
        &self,
        user_id: &UserId,
        confirmation: DeletionConfirmation,
    ) -> Result<(), Error> {
        let account = self.load(user_id).await?;
        if account.user().email().as_ref() != confirmation.email() {
            warn!(user_id = %user_id, "account deletion rejected: email mismatch");
            return Err(Self::unknown_user());
        }
        if confirmation.password().is_empty() {
            warn!(user_id = %user_id, "account deletion rejected: password missing");
            return Err(Error::invalid_credentials("password confirmation required"));
        }
        if !self
            .password_matches(confirmation.password(), account.password_hash())
            .await?
        {
            warn!(user_id = %user_id, "account deletion rejected: wrong password");
            return Err(Error::invalid_credentials("invalid email or password"));
        }

        let deleted = self
            .users
            .delete(user_id)
            .await
            .map_err(Self::map_user_error)?;
        if !deleted {
            return Err(Self::unknown_user());
        }
        info!(user_id = %user_id, "deleted user account");
        Ok(())
    }

    fn session_user(&self, token: &str) -> Option<UserId> {
        match self.tokens.verify(token, self.clock.utc()) {
            Ok(claims) => Some(claims.user_id),
            Err(error) => {
                debug!(%error, "ignoring unusable session token");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
