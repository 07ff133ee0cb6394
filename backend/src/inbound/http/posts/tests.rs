//! Tests for post HTTP handlers.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockPostsCommand, MockPostsQuery};
use crate::inbound::http::configure_api;
use crate::inbound::http::test_utils::{accounts_with_sessions, bearer_for, state_with};
use crate::test_support::fixture_timestamp;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn author() -> UserId {
    UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id")
}

fn sample_post(author: &UserId) -> Post {
    let draft = PostDraft::try_from_parts(
        "Hello, world",
        "First post on the blog.",
        Some(&["rust", "actix"][..]),
        None,
    )
    .expect("fixture draft is valid");
    Post::new(PostId::random(), author.clone(), draft, fixture_timestamp())
}

async fn app_with(
    posts_query: MockPostsQuery,
    posts: MockPostsCommand,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(
                accounts_with_sessions(),
                posts_query,
                posts,
            )))
            .configure(configure_api),
    )
    .await
}

async fn json_body(response: ServiceResponse) -> Value {
    actix_test::read_body_json(response).await
}

#[rstest]
#[actix_web::test]
async fn list_posts_serialises_camel_case(author: UserId) {
    let post = sample_post(&author);
    let mut query = MockPostsQuery::new();
    query
        .expect_list_posts()
        .returning(move || Ok(vec![post.clone()]));
    let app = app_with(query, MockPostsCommand::new()).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/posts").to_request())
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let first = body.get(0).expect("one post");
    assert_eq!(first.get("authorId"), Some(&json!(author.to_string())));
    assert_eq!(first.get("viewsCount"), Some(&json!(0)));
    assert_eq!(first.get("tags"), Some(&json!(["rust", "actix"])));
}

#[actix_web::test]
async fn list_tags_forwards_limit() {
    let mut query = MockPostsQuery::new();
    query
        .expect_list_tags()
        .withf(|limit| *limit == Some(2))
        .returning(|_| Ok(vec!["rust".to_owned(), "actix".to_owned()]));
    let app = app_with(query, MockPostsCommand::new()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/posts/tags?limit=2")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!(["rust", "actix"]));
}

#[actix_web::test]
async fn list_tags_rejects_non_numeric_limit() {
    let mut query = MockPostsQuery::new();
    query.expect_list_tags().never();
    let app = app_with(query, MockPostsCommand::new()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/posts/tags?limit=many")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn get_post_returns_counted_post(author: UserId) {
    let post = sample_post(&author).viewed();
    let id = post.id();
    let mut query = MockPostsQuery::new();
    query
        .expect_get_post()
        .withf(move |requested| *requested == id)
        .returning(move |_| Ok(post.clone()));
    let app = app_with(query, MockPostsCommand::new()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/posts/{id}"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.get("viewsCount"), Some(&json!(1)));
}

#[actix_web::test]
async fn get_post_with_malformed_id_is_not_found() {
    let mut query = MockPostsQuery::new();
    query.expect_get_post().never();
    let app = app_with(query, MockPostsCommand::new()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/posts/650e20a026237bc06031cb23")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body.get("code"), Some(&json!("not_found")));
}

#[rstest]
#[actix_web::test]
async fn create_post_passes_session_and_author(author: UserId) {
    let post = sample_post(&author);
    let expected_author = author.clone();
    let mut command = MockPostsCommand::new();
    command
        .expect_create_post()
        .withf(move |request| {
            request.author_id == expected_author
                && request.session.as_ref() == Some(&expected_author)
                && request.draft.tags().as_slice() == ["news", "rust"]
        })
        .times(1)
        .returning(move |_| Ok(post.clone()));
    let app = app_with(MockPostsQuery::new(), command).await;

    let request = actix_test::TestRequest::post()
        .uri("/posts")
        .insert_header((AUTHORIZATION, bearer_for(&author)))
        .set_json(json!({
            "title": "Hello, world",
            "text": "First post on the blog.",
            "authorId": author.to_string(),
            "tags": "news, rust",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn create_post_with_malformed_author_is_forbidden() {
    let mut command = MockPostsCommand::new();
    command.expect_create_post().never();
    let app = app_with(MockPostsQuery::new(), command).await;

    let request = actix_test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({
            "title": "Hello, world",
            "text": "First post on the blog.",
            "authorId": "650e20a026237bc06031cb22",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body.get("code"), Some(&json!("forbidden")));
}

#[rstest]
#[case(json!({"title": "Hi", "text": "Long enough", "authorId": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}), "title")]
#[case(json!({"title": "Hello", "text": "", "authorId": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}), "text")]
#[case(json!({"title": "Hello", "text": "Long enough"}), "authorId")]
#[case(
    json!({"title": "Hello", "text": "Long enough", "authorId": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "imageUrl": "not a url"}),
    "imageUrl"
)]
#[actix_web::test]
async fn create_post_rejects_invalid_fields(#[case] payload: Value, #[case] field: &str) {
    let mut command = MockPostsCommand::new();
    command.expect_create_post().never();
    let app = app_with(MockPostsQuery::new(), command).await;

    let request = actix_test::TestRequest::post()
        .uri("/posts")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some(field)
    );
}

#[rstest]
#[actix_web::test]
async fn update_post_forwards_changes_without_tags(author: UserId) {
    let post_id = PostId::random();
    let expected_author = author.clone();
    let mut command = MockPostsCommand::new();
    command
        .expect_update_post()
        .withf(move |request| {
            request.post_id == post_id
                && request.session.as_ref() == Some(&expected_author)
                && request.changes.tags().is_none()
        })
        .times(1)
        .returning(|_| Ok(()));
    let app = app_with(MockPostsQuery::new(), command).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/posts/{post_id}"))
        .insert_header((AUTHORIZATION, bearer_for(&author)))
        .set_json(json!({"title": "Edited title", "text": "Edited text"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"success": true}));
}

#[rstest]
#[case(ErrorCode::Forbidden, StatusCode::FORBIDDEN)]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_post_surfaces_guard_failures(#[case] code: ErrorCode, #[case] status: StatusCode) {
    let mut command = MockPostsCommand::new();
    command
        .expect_delete_post()
        .withf(|session, _| session.is_none())
        .returning(move |_, _| Err(Error::new(code, "denied")));
    let app = app_with(MockPostsQuery::new(), command).await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/posts/{}", PostId::random()))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
}
