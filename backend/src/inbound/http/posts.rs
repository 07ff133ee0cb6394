//! Post HTTP handlers.
//!
//! ```text
//! GET /posts
//! GET /posts/tags?limit=5
//! GET /posts/{id}
//! POST /posts {"title":"Hello","text":"First post","authorId":"...","tags":["rust"]}
//! PATCH /posts/{id} {"title":"Hello again","text":"Edited"}
//! DELETE /posts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreatePostRequest, UpdatePostRequest};
use crate::domain::{Error, Post, PostChanges, PostDraft, PostId, PostValidationError, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::SuccessResponse;
use crate::inbound::http::validation::{invalid_field_error, missing_field_error};

/// Tags as sent by clients: a JSON array or a comma-separated string.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl TagsInput {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::List(tags) => tags,
            Self::Csv(raw) => raw.split(',').map(str::to_owned).collect(),
        }
    }
}

/// Request body for `POST /posts`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPostRequest {
    #[schema(example = "Hello, world")]
    pub title: String,
    #[schema(example = "First post on the blog.")]
    pub text: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub author_id: Option<String>,
    pub tags: Option<TagsInput>,
    pub image_url: Option<String>,
}

/// Request body for `PATCH /posts/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditPostRequest {
    pub title: String,
    pub text: String,
    pub tags: Option<TagsInput>,
    pub image_url: Option<String>,
}

/// Query parameters for `GET /posts/tags`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TagsQuery {
    /// Maximum number of tags to return.
    pub limit: Option<usize>,
}

/// Post as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[schema(example = "0f8fad5b-d9cb-469f-a165-70867728950e")]
    pub id: String,
    pub title: String,
    pub text: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub author_id: String,
    pub views_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id().to_string(),
            title: post.title().to_owned(),
            text: post.text().to_owned(),
            tags: post.tags().as_slice().to_vec(),
            image_url: post.image_url().map(ToString::to_string),
            author_id: post.author_id().to_string(),
            views_count: post.views_count(),
            created_at: post.created_at().to_rfc3339(),
            updated_at: post.updated_at().to_rfc3339(),
        }
    }
}

fn map_post_validation_error(err: PostValidationError) -> Error {
    invalid_field_error(err.field(), err.to_string())
}

/// Ids that are not UUIDs can never name a stored post.
fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    PostId::new(raw).map_err(|_| Error::not_found("post not found"))
}

/// Malformed author ids are treated like unknown authors.
fn parse_author_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::forbidden("author does not exist"))
}

/// List all posts, newest first.
#[utoipa::path(
    get,
    path = "/posts",
    responses(
        (status = 200, description = "All posts", body = [PostResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts",
    security([])
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let posts = state.posts_query.list_posts().await?;
    Ok(web::Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Distinct tags, most recently used first.
#[utoipa::path(
    get,
    path = "/posts/tags",
    params(TagsQuery),
    responses(
        (status = 200, description = "Recent tags", body = [String]),
        (status = 400, description = "Invalid query", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listTags",
    security([])
)]
#[get("/posts/tags")]
pub async fn list_tags(
    state: web::Data<HttpState>,
    query: web::Query<TagsQuery>,
) -> ApiResult<web::Json<Vec<String>>> {
    let tags = state.posts_query.list_tags(query.limit).await?;
    Ok(web::Json(tags))
}

/// Fetch one post, counting the view.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost",
    security([])
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostResponse>> {
    let id = parse_post_id(&path)?;
    let post = state.posts_query.get_post(&id).await?;
    Ok(web::Json(PostResponse::from(post)))
}

/// Publish a post for an existing author.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = NewPostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Unknown author or another user's session", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewPostRequest>,
) -> ApiResult<HttpResponse> {
    let NewPostRequest {
        title,
        text,
        author_id,
        tags,
        image_url,
    } = payload.into_inner();
    let tags = tags.map(TagsInput::into_vec);
    let draft = PostDraft::try_from_parts(&title, &text, tags.as_deref(), image_url.as_deref())
        .map_err(map_post_validation_error)?;
    let author_id = author_id.ok_or_else(|| missing_field_error("authorId"))?;
    let author_id = parse_author_id(&author_id)?;

    let post = state
        .posts
        .create_post(CreatePostRequest {
            author_id,
            session: session.into_user_id(),
            draft,
        })
        .await?;
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// Replace a post's content. Only its author may do so.
#[utoipa::path(
    patch,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = EditPostRequest,
    responses(
        (status = 200, description = "Post updated", body = SuccessResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[patch("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<EditPostRequest>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let EditPostRequest {
        title,
        text,
        tags,
        image_url,
    } = payload.into_inner();
    let tags = tags.map(TagsInput::into_vec);
    let changes = PostChanges::try_from_parts(&title, &text, tags.as_deref(), image_url.as_deref())
        .map_err(map_post_validation_error)?;
    let post_id = parse_post_id(&path)?;

    state
        .posts
        .update_post(UpdatePostRequest {
            session: session.into_user_id(),
            post_id,
            changes,
        })
        .await?;
    Ok(web::Json(SuccessResponse::ok()))
}

/// Delete a post. Only its author may do so.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted", body = SuccessResponse),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let post_id = parse_post_id(&path)?;
    state
        .posts
        .delete_post(session.into_user_id(), &post_id)
        .await?;
    Ok(web::Json(SuccessResponse::ok()))
}

#[cfg(test)]
mod tests;
