//! Tests for account HTTP handlers.

use super::*;
use crate::domain::ports::MockUserAccounts;
use crate::domain::{ErrorCode, SessionToken, UserId};
use crate::inbound::http::configure_api;
use crate::inbound::http::test_utils::{accounts_with_sessions, bearer_for, state_with_accounts};
use crate::test_support::account_with_email;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

async fn app_with(
    accounts: MockUserAccounts,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_with_accounts(accounts)))
            .configure(configure_api),
    )
    .await
}

fn signed_in(user: &User) -> AuthenticatedUser {
    AuthenticatedUser {
        user: user.clone(),
        token: SessionToken::new("issued.jwt.token"),
    }
}

async fn error_body(response: ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("error payload")
}

#[actix_web::test]
async fn register_returns_created_profile_and_token() {
    let account = account_with_email("ada@example.com");
    let user = account.user().clone();
    let mut accounts = MockUserAccounts::new();
    accounts
        .expect_register()
        .withf(|registration| {
            registration.email().as_ref() == "ada@example.com"
                && registration.full_name().as_ref() == "x"
        })
        .times(1)
        .returning(move |_| Ok(signed_in(&user)));
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({"email": "Ada@Example.com", "fullName": "x", "password": "password"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("email"), Some(&json!("ada@example.com")));
    assert_eq!(body.get("fullName"), Some(&json!("Fixture User")));
    assert_eq!(body.get("token"), Some(&json!("issued.jwt.token")));
    assert!(body.get("passwordHash").is_none());
}

#[rstest]
#[case(json!({"email": "not-an-email", "fullName": "Ada", "password": "password"}), "email")]
#[case(json!({"email": "ada@example.com", "fullName": "  ", "password": "password"}), "fullName")]
#[case(json!({"email": "ada@example.com", "fullName": "Ada", "password": "pw"}), "password")]
#[case(
    json!({"email": "ada@example.com", "fullName": "Ada", "password": "password", "avatarUrl": "ftp://x"}),
    "avatarUrl"
)]
#[actix_web::test]
async fn register_rejects_invalid_fields(#[case] payload: Value, #[case] field: &str) {
    let mut accounts = MockUserAccounts::new();
    accounts.expect_register().never();
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::post()
        .uri("/auth/register")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body.get("code"), Some(&json!("invalid_request")));
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some(field)
    );
}

#[actix_web::test]
async fn register_reports_duplicate_email_as_conflict() {
    let mut accounts = MockUserAccounts::new();
    accounts
        .expect_register()
        .returning(|_| Err(Error::conflict("user already exists")));
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({"email": "ada@example.com", "fullName": "Ada", "password": "password"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = error_body(response).await;
    assert_eq!(body.get("error"), Some(&json!("user already exists")));
}

#[rstest]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::InvalidCredentials, StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn login_surfaces_domain_failures(#[case] code: ErrorCode, #[case] status: StatusCode) {
    let mut accounts = MockUserAccounts::new();
    accounts
        .expect_login()
        .returning(move |_| Err(Error::new(code, "login failed")));
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "ada@example.com", "password": "wrong"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
}

#[actix_web::test]
async fn login_rejects_blank_password_without_calling_service() {
    let mut accounts = MockUserAccounts::new();
    accounts.expect_login().never();
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "ada@example.com", "password": ""}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some("password")
    );
}

#[actix_web::test]
async fn current_user_requires_a_session() {
    let mut accounts = accounts_with_sessions();
    accounts.expect_get_self().never();
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::get().uri("/auth/me").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = error_body(response).await;
    assert_eq!(body.get("code"), Some(&json!("unauthorized")));
}

#[actix_web::test]
async fn current_user_returns_profile_for_session() {
    let account = account_with_email("ada@example.com");
    let user = account.user().clone();
    let user_id = user.id().clone();
    let expected_id = user_id.clone();
    let mut accounts = accounts_with_sessions();
    accounts
        .expect_get_self()
        .withf(move |id| *id == expected_id)
        .returning(move |_| Ok(user.clone()));
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::get()
        .uri("/auth/me")
        .insert_header((AUTHORIZATION, bearer_for(&user_id)))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: UserResponse = actix_test::read_body_json(response).await;
    assert_eq!(body.id, user_id.to_string());
    assert_eq!(body.email, "ada@example.com");
}

#[actix_web::test]
async fn delete_current_user_checks_session_before_body() {
    let mut accounts = accounts_with_sessions();
    accounts.expect_delete_self().never();
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::delete().uri("/user").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn delete_current_user_requires_confirmation_body() {
    let user_id = UserId::random();
    let mut accounts = accounts_with_sessions();
    accounts.expect_delete_self().never();
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::delete()
        .uri("/user")
        .insert_header((AUTHORIZATION, bearer_for(&user_id)))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn delete_current_user_passes_confirmation_to_service() {
    let user_id = UserId::random();
    let expected_id = user_id.clone();
    let mut accounts = accounts_with_sessions();
    accounts
        .expect_delete_self()
        .withf(move |id, confirmation| {
            *id == expected_id
                && confirmation.email() == "ada@example.com"
                && confirmation.password() == "password"
        })
        .times(1)
        .returning(|_, _| Ok(()));
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::delete()
        .uri("/user")
        .insert_header((AUTHORIZATION, bearer_for(&user_id)))
        .set_json(json!({"email": "ADA@example.com", "password": "password"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"success": true}));
}

#[actix_web::test]
async fn delete_current_user_accepts_a_missing_password() {
    let user_id = UserId::random();
    let mut accounts = accounts_with_sessions();
    accounts
        .expect_delete_self()
        .withf(|_, confirmation| {
            confirmation.email() == "non exist email" && confirmation.password().is_empty()
        })
        .times(1)
        .returning(|_, _| Err(Error::not_found("user not found")));
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::delete()
        .uri("/user")
        .insert_header((AUTHORIZATION, bearer_for(&user_id)))
        .set_json(json!({"email": "non exist email"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_current_user_reports_malformed_json() {
    let user_id = UserId::random();
    let mut accounts = accounts_with_sessions();
    accounts.expect_delete_self().never();
    let app = app_with(accounts).await;

    let request = actix_test::TestRequest::delete()
        .uri("/user")
        .insert_header((AUTHORIZATION, bearer_for(&user_id)))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|message| message.starts_with("invalid JSON body"))
    );
}
