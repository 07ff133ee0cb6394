//! In-memory [`UserRepository`].

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{UserAccount, UserId};

use super::poisoned;

/// Accounts held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error() -> UserRepositoryError {
    UserRepositoryError::query(poisoned("user"))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        let mut accounts = self.accounts.write().map_err(|_| lock_error())?;
        let email = account.user().email();
        if accounts
            .values()
            .any(|existing| existing.user().email() == email)
        {
            return Err(UserRepositoryError::duplicate_email(email.as_ref()));
        }
        accounts.insert(account.user().id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserRepositoryError> {
        let accounts = self.accounts.read().map_err(|_| lock_error())?;
        Ok(accounts.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        let accounts = self.accounts.read().map_err(|_| lock_error())?;
        Ok(accounts
            .values()
            .find(|account| account.user().email().as_ref() == email)
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        let mut accounts = self.accounts.write().map_err(|_| lock_error())?;
        Ok(accounts.remove(id).is_some())
    }
}
