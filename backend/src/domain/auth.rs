//! Authentication primitives: credentials, password hashes and session tokens.
//!
//! Inbound payload parsing stays outside the domain. Handlers call the
//! constructors here to validate raw strings before reaching a service.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::domain::{Email, FullName, ImageUrl, ImageUrlError, User, UserId, UserValidationError};

/// Minimum accepted password length for new accounts.
pub const PASSWORD_MIN: usize = 5;
/// Maximum accepted password length for new accounts.
pub const PASSWORD_MAX: usize = 128;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated email/password pair used for login.
///
/// ## Invariants
/// - `email` is trimmed, lowercased and non-empty. It is not checked against
///   the address pattern so unknown addresses surface as lookups that miss.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use blog_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.com ", "password").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalised = email.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalised,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email suitable for lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Email and password re-entered to confirm deleting the signed-in account.
///
/// Nothing is rejected up front. The email is compared with the account
/// first, so a mismatch wins over a blank or absent password.
///
/// # Examples
/// ```
/// use blog_backend::domain::DeletionConfirmation;
///
/// let confirmation = DeletionConfirmation::new(" Ada@Example.com ", None);
/// assert_eq!(confirmation.email(), "ada@example.com");
/// assert!(confirmation.password().is_empty());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct DeletionConfirmation {
    email: String,
    password: Zeroizing<String>,
}

impl DeletionConfirmation {
    /// Normalise the email; an absent password becomes empty.
    #[must_use]
    pub fn new(email: &str, password: Option<&str>) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password: Zeroizing::new(password.unwrap_or_default().to_owned()),
        }
    }

    /// Normalised email to compare with the account.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password as supplied, possibly empty.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for DeletionConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeletionConfirmation")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Errors raised while validating a registration payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error("{0}")]
    User(#[from] UserValidationError),
    #[error("avatar {0}")]
    AvatarUrl(#[from] ImageUrlError),
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("password must be at most {max} characters")]
    PasswordTooLong { max: usize },
}

impl RegistrationValidationError {
    /// Name of the offending payload field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::User(UserValidationError::EmptyFullName)
            | Self::User(UserValidationError::FullNameTooLong { .. }) => "fullName",
            Self::User(_) => "email",
            Self::AvatarUrl(_) => "avatarUrl",
            Self::PasswordTooShort { .. } | Self::PasswordTooLong { .. } => "password",
        }
    }
}

/// Validated sign-up request.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    email: Email,
    full_name: FullName,
    password: Zeroizing<String>,
    avatar_url: Option<ImageUrl>,
}

impl Registration {
    /// Validate raw registration fields.
    pub fn try_from_parts(
        email: &str,
        full_name: &str,
        password: &str,
        avatar_url: Option<&str>,
    ) -> Result<Self, RegistrationValidationError> {
        let email = Email::new(email)?;
        let full_name = FullName::new(full_name)?;
        let length = password.chars().count();
        if length < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(RegistrationValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        let avatar_url = ImageUrl::parse_optional(avatar_url)?;

        Ok(Self {
            email,
            full_name,
            password: Zeroizing::new(password.to_owned()),
            avatar_url,
        })
    }

    /// Normalised email.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Trimmed full name.
    #[must_use]
    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Clear-text password to be hashed.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Optional avatar location.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&ImageUrl> {
        self.avatar_url.as_ref()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password", &"<redacted>")
            .field("avatar_url", &self.avatar_url)
            .finish()
    }
}

/// Encoded password hash (PHC string format).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a hasher or read from a store.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Stored account: the public profile plus its credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    user: User,
    password_hash: PasswordHash,
}

impl UserAccount {
    /// Pair a user with its password hash.
    #[must_use]
    pub fn new(user: User, password_hash: PasswordHash) -> Self {
        Self {
            user,
            password_hash,
        }
    }

    /// Public profile.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Drop the credential and keep the profile.
    #[must_use]
    pub fn into_user(self) -> User {
        self.user
    }
}

/// Opaque signed session credential handed to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded representation sent to clients.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

/// Verified session claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// User the session was issued to.
    pub user_id: UserId,
    /// Issue time.
    pub issued_at: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful register or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Profile of the signed-in user.
    pub user: User,
    /// Session credential for subsequent requests.
    pub token: SessionToken,
}
