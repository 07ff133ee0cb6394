//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities used by the HTTP and
//! persistence adapters, the ports those adapters plug into, and the services
//! implementing the account and post use-cases.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserAccount and friends: accounts and credentials.
//! - Post, PostDraft, PostChanges: posts and their validated inputs.
//! - `ensure_owner`: the ownership guard for post mutations.
//! - AccountService, PostService: driving port implementations.

pub mod account_service;
pub mod auth;
pub mod authorization;
pub mod error;
pub mod image_url;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AuthenticatedUser, CredentialsValidationError, DeletionConfirmation, LoginCredentials,
    PASSWORD_MAX, PASSWORD_MIN, PasswordHash, Registration, RegistrationValidationError,
    SessionClaims, SessionToken, UserAccount,
};
pub use self::authorization::ensure_owner;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::image_url::{ImageUrl, ImageUrlError};
pub use self::post::{
    Post, PostChanges, PostDraft, PostId, PostSnapshot, PostValidationError, Tags, recent_tags,
};
pub use self::post_service::PostService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, FullName, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use blog_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
