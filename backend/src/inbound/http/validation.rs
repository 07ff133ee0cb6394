//! Shared validation helpers for inbound HTTP adapters.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::web;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Maximum accepted JSON body size. Post text tops out near 100 kB.
const JSON_LIMIT_BYTES: usize = 256 * 1024;

/// Error for a required payload field that was absent.
pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Error for a payload field that failed domain validation.
pub(crate) fn invalid_field_error(field: &'static str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": "invalid_field",
    }))
}

/// JSON extractor configuration reporting malformed bodies as
/// `invalid_request` errors in the shared error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err: JsonPayloadError, _req| {
            debug!(error = %err, "rejected JSON payload");
            let message = match &err {
                JsonPayloadError::ContentType => "expected a JSON body".to_owned(),
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    "request body too large".to_owned()
                }
                other => format!("invalid JSON body: {other}"),
            };
            Error::invalid_request(message).into()
        })
}

/// Query-string extractor configuration reporting malformed parameters as
/// `invalid_request` errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req| {
        debug!(error = %err, "rejected query string");
        Error::invalid_request(format!("invalid query string: {err}")).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Deserialize)]
    struct Body {
        #[expect(dead_code, reason = "only deserialised")]
        name: String,
    }

    #[rstest]
    fn missing_field_error_names_the_field() {
        let err = missing_field_error("authorId");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "authorId is required");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "authorId", "code": "missing_field"}))
        );
    }

    #[actix_web::test]
    async fn malformed_json_uses_error_shape() {
        let app = actix_test::init_service(App::new().app_data(json_config()).route(
            "/",
            web::post().to(|_body: web::Json<Body>| async { HttpResponse::Ok().finish() }),
        ))
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":")
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
        assert!(body.get("error").and_then(Value::as_str).is_some());
    }
}
