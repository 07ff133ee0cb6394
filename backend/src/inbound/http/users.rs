//! Account HTTP handlers.
//!
//! ```text
//! POST /auth/register {"email":"ada@example.com","fullName":"Ada","password":"password"}
//! POST /auth/login {"email":"ada@example.com","password":"password"}
//! GET /auth/me
//! DELETE /user {"email":"ada@example.com","password":"password"}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AuthenticatedUser, CredentialsValidationError, DeletionConfirmation, Error, LoginCredentials,
    Registration, RegistrationValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::invalid_field_error;

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    #[schema(example = "password")]
    pub password: String,
    #[schema(example = "https://example.com/ada.png")]
    pub avatar_url: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "password")]
    pub password: String,
}

/// Confirmation body for `DELETE /user`.
///
/// `password` may be omitted; the email is checked against the account first.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "password")]
    pub password: Option<String>,
}

impl From<&DeleteAccountRequest> for DeletionConfirmation {
    fn from(value: &DeleteAccountRequest) -> Self {
        Self::new(&value.email, value.password.as_deref())
    }
}

impl TryFrom<&CredentialsRequest> for LoginCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: &CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Public profile of a user. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            full_name: user.full_name().to_string(),
            avatar_url: user.avatar_url().map(ToString::to_string),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// Profile plus the bearer token issued at sign-up or sign-in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Bearer token for the `Authorization` header.
    pub token: String,
}

impl From<AuthenticatedUser> for SessionResponse {
    fn from(value: AuthenticatedUser) -> Self {
        Self {
            user: UserResponse::from(&value.user),
            token: value.token.into(),
        }
    }
}

/// Success marker returned by mutations without a body of their own.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub(crate) fn ok() -> Self {
        Self { success: true }
    }
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    invalid_field_error(err.field(), err.to_string())
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::EmptyEmail => "email",
        CredentialsValidationError::EmptyPassword => "password",
    };
    invalid_field_error(field, err.to_string())
}

/// Register an account and sign it in.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        email,
        full_name,
        password,
        avatar_url,
    } = payload.into_inner();
    let registration =
        Registration::try_from_parts(&email, &full_name, &password, avatar_url.as_deref())
            .map_err(map_registration_error)?;
    let authenticated = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(SessionResponse::from(authenticated)))
}

/// Sign in with email and password.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 400, description = "Invalid request or wrong password", body = ErrorSchema),
        (status = 404, description = "Unknown email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let credentials =
        LoginCredentials::try_from(&payload.into_inner()).map_err(map_credentials_error)?;
    let authenticated = state.accounts.login(credentials).await?;
    Ok(web::Json(SessionResponse::from(authenticated)))
}

/// Profile of the signed-in user.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 403, description = "No session", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.accounts.get_self(&user_id).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Delete the signed-in account after re-confirming its credentials.
///
/// The session is checked before the body so anonymous callers always see
/// `403` regardless of what they sent.
#[utoipa::path(
    delete,
    path = "/user",
    request_body = DeleteAccountRequest,
    responses(
        (status = 200, description = "Account deleted", body = SuccessResponse),
        (status = 400, description = "Invalid request or wrong password", body = ErrorSchema),
        (status = 403, description = "No session", body = ErrorSchema),
        (status = 404, description = "Account missing or email mismatch", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteCurrentUser"
)]
#[delete("/user")]
pub async fn delete_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<DeleteAccountRequest>, actix_web::Error>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let user_id = session.require_user_id()?;
    let payload = payload.map_err(Error::from)?;
    let confirmation = DeletionConfirmation::from(&*payload);
    state.accounts.delete_self(&user_id, confirmation).await?;
    Ok(web::Json(SuccessResponse::ok()))
}

#[cfg(test)]
mod tests;
