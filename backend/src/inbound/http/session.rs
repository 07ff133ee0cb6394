//! Bearer-token session extraction.
//!
//! Handlers take a [`SessionContext`] to learn who is signed in. The token is
//! resolved through [`crate::domain::ports::UserAccounts::session_user`], so a
//! missing, malformed, tampered or expired token simply yields no session.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Session resolved from the `Authorization` header, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext(Option<UserId>);

impl SessionContext {
    /// Wrap an already resolved user id.
    pub fn new(user_id: Option<UserId>) -> Self {
        Self(user_id)
    }

    /// Signed-in user id, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref()
    }

    /// Consume the context, yielding the signed-in user id if any.
    pub fn into_user_id(self) -> Option<UserId> {
        self.0
    }

    /// Require an authenticated user id or return `unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.0
            .clone()
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

/// Extract the credential from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively; any other scheme is ignored.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<HttpState>>() else {
            return ready(Err(Error::internal("HTTP state is not configured").into()));
        };
        let user_id = bearer_token(req.headers()).and_then(|token| {
            let resolved = state.accounts.session_user(token);
            if resolved.is_none() {
                debug!("bearer token rejected; continuing without a session");
            }
            resolved
        });
        ready(Ok(Self(user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::HeaderValue;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;

    use crate::domain::ports::MockUserAccounts;
    use crate::inbound::http::test_utils::state_with_accounts;

    const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(value).expect("valid header value"),
        );
        headers
    }

    #[rstest]
    #[case("Bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("bearer   abc", Some("abc"))]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("Bearer ", None)]
    #[case("abc.def.ghi", None)]
    fn bearer_token_parses_scheme(#[case] header: &str, #[case] expected: Option<&str>) {
        let headers = headers_with(header);
        assert_eq!(bearer_token(&headers), expected);
    }

    #[rstest]
    fn missing_header_has_no_token() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[rstest]
    fn require_user_id_without_session_is_unauthorized() {
        let err = SessionContext::default()
            .require_user_id()
            .expect_err("no session");
        assert_eq!(err.code(), crate::domain::ErrorCode::Unauthorized);
    }

    fn accounts_resolving(token: &'static str) -> MockUserAccounts {
        let mut accounts = MockUserAccounts::new();
        accounts.expect_session_user().returning(move |presented| {
            (presented == token).then(|| UserId::new(USER_ID).expect("fixture id"))
        });
        accounts
    }

    async fn call_whoami(header: Option<&str>) -> (StatusCode, String) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_accounts(accounts_resolving(
                    "good-token",
                ))))
                .route(
                    "/whoami",
                    web::get().to(|session: SessionContext| async move {
                        let id = session.require_user_id()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                    }),
                ),
        )
        .await;
        let mut request = actix_test::TestRequest::get().uri("/whoami");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value.to_owned()));
        }
        let res = actix_test::call_service(&app, request.to_request()).await;
        let status = res.status();
        let body = actix_test::read_body(res).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_web::test]
    async fn resolves_valid_bearer_token() {
        let (status, body) = call_whoami(Some("Bearer good-token")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, USER_ID);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Bearer forged-token"))]
    #[actix_web::test]
    async fn rejected_tokens_leave_no_session(#[case] header: Option<&'static str>) {
        let (status, _) = call_whoami(header).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
