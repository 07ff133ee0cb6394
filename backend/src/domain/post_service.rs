//! Post domain service.
//!
//! Implements [`PostsQuery`] and [`PostsCommand`]. Every mutation passes the
//! [`ensure_owner`] guard before touching the store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    CreatePostRequest, PostRepository, PostRepositoryError, PostsCommand, PostsQuery,
    UpdatePostRequest, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, Post, PostId, UserId, ensure_owner, recent_tags};

/// Post service implementing the post driving ports.
#[derive(Clone)]
pub struct PostService<P, U> {
    posts: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, U> PostService<P, U> {
    /// Create a new service over the given repositories.
    pub fn new(posts: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            users,
            clock,
        }
    }
}

impl<P, U> PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    fn map_post_error(error: PostRepositoryError) -> Error {
        match error {
            PostRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("post repository unavailable: {message}"))
            }
            PostRepositoryError::Query { message } => {
                Error::internal(format!("post repository error: {message}"))
            }
        }
    }

    fn map_user_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            other => Error::internal(format!("user repository error: {other}")),
        }
    }

    fn post_not_found() -> Error {
        Error::not_found("post not found")
    }

    async fn load(&self, id: &PostId) -> Result<Post, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(Self::map_post_error)?
            .ok_or_else(Self::post_not_found)
    }

    async fn load_owned(&self, session: Option<&UserId>, id: &PostId) -> Result<Post, Error> {
        let post = self.load(id).await?;
        if let Err(denied) = ensure_owner(session, &post) {
            warn!(
                post_id = %id,
                session_user = session.map_or("<none>", |user_id| user_id.as_ref()),
                "post mutation denied"
            );
            return Err(denied);
        }
        Ok(post)
    }
}

#[async_trait]
impl<P, U> PostsQuery for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        self.posts.list().await.map_err(Self::map_post_error)
    }

    async fn list_tags(&self, limit: Option<usize>) -> Result<Vec<String>, Error> {
        let posts = self.posts.list().await.map_err(Self::map_post_error)?;
        Ok(recent_tags(&posts, limit))
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, Error> {
        self.posts
            .increment_views(id)
            .await
            .map_err(Self::map_post_error)?
            .ok_or_else(Self::post_not_found)
    }
}

#[async_trait]
impl<P, U> PostsCommand for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error> {
        let CreatePostRequest {
            author_id,
            session,
            draft,
        } = request;

        if session.as_ref().is_some_and(|user_id| user_id != &author_id) {
            warn!(author_id = %author_id, "post creation denied: session names another user");
            return Err(Error::forbidden("posts may only be created for yourself"));
        }
        let author_exists = self
            .users
            .find_by_id(&author_id)
            .await
            .map_err(Self::map_user_error)?
            .is_some();
        if !author_exists {
            warn!(author_id = %author_id, "post creation denied: unknown author");
            return Err(Error::forbidden("author does not exist"));
        }

        let post = Post::new(PostId::random(), author_id, draft, self.clock.utc());
        self.posts
            .insert(&post)
            .await
            .map_err(Self::map_post_error)?;
        info!(post_id = %post.id(), author_id = %post.author_id(), "created post");
        Ok(post)
    }

    async fn update_post(&self, request: UpdatePostRequest) -> Result<(), Error> {
        let UpdatePostRequest {
            session,
            post_id,
            changes,
        } = request;

        let post = self.load_owned(session.as_ref(), &post_id).await?;
        let updated = post.apply(changes, self.clock.utc());
        let stored = self
            .posts
            .update(&updated)
            .await
            .map_err(Self::map_post_error)?;
        if !stored {
            return Err(Self::post_not_found());
        }
        info!(post_id = %post_id, "updated post");
        Ok(())
    }

    async fn delete_post(&self, session: Option<UserId>, id: &PostId) -> Result<(), Error> {
        self.load_owned(session.as_ref(), id).await?;
        let deleted = self
            .posts
            .delete(id)
            .await
            .map_err(Self::map_post_error)?;
        if !deleted {
            return Err(Self::post_not_found());
        }
        info!(post_id = %id, "deleted post");
        Ok(())
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
