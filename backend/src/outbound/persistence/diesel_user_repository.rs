//! PostgreSQL-backed [`UserRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, FullName, ImageUrl, PasswordHash, User, UserAccount, UserId};

use super::diesel_error_mapping::StoreFailure;
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: StoreFailure, email: Option<&str>) -> UserRepositoryError {
    match failure {
        StoreFailure::Connection(message) => UserRepositoryError::connection(message),
        StoreFailure::UniqueViolation => {
            UserRepositoryError::duplicate_email(email.unwrap_or_default())
        }
        StoreFailure::Query(message) => UserRepositoryError::query(message),
    }
}

fn fail<E: Into<StoreFailure>>(error: E) -> UserRepositoryError {
    map_failure(error.into(), None)
}

fn corrupt(field: &str, error: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::query(format!("stored user has invalid {field}: {error}"))
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserRepositoryError> {
    let email = Email::new(&row.email).map_err(|err| corrupt("email", err))?;
    let full_name = FullName::new(&row.full_name).map_err(|err| corrupt("full name", err))?;
    let avatar_url = ImageUrl::parse_optional(row.avatar_url.as_deref())
        .map_err(|err| corrupt("avatar url", err))?;
    let user = User::new(
        UserId::from_uuid(row.id),
        email,
        full_name,
        avatar_url,
        row.created_at,
    )
    .with_timestamps(row.created_at, row.updated_at);
    Ok(UserAccount::new(user, PasswordHash::new(row.password_hash)))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let user = account.user();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            full_name: user.full_name().as_ref(),
            password_hash: account.password_hash().as_str(),
            avatar_url: user.avatar_url().map(AsRef::as_ref),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_failure(err.into(), Some(user.email().as_ref())))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(fail)?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(fail)?;
        row.map(row_to_account).transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let deleted = diesel::delete(users::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(fail)?;
        Ok(deleted > 0)
    }
}
