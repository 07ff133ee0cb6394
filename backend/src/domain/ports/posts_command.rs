//! Driving port for creating and changing posts.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostChanges, PostDraft, PostId, UserId};

/// Request to publish a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostRequest {
    /// Claimed author. Must name an existing user.
    pub author_id: UserId,
    /// Signed-in user, if any. When present it must match `author_id`.
    pub session: Option<UserId>,
    /// Validated content.
    pub draft: PostDraft,
}

/// Request to replace a post's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePostRequest {
    /// Signed-in user, if any.
    pub session: Option<UserId>,
    /// Target post.
    pub post_id: PostId,
    /// Validated replacement content.
    pub changes: PostChanges,
}

/// Write-side post use-cases. Mutations are guarded by ownership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Publish a post.
    ///
    /// # Errors
    /// `Forbidden` when the author is unknown or differs from the session.
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error>;

    /// Replace a post's content.
    ///
    /// # Errors
    /// `NotFound` when the post is absent; `Forbidden` unless the session owns
    /// it.
    async fn update_post(&self, request: UpdatePostRequest) -> Result<(), Error>;

    /// Delete a post.
    ///
    /// # Errors
    /// `NotFound` when the post is absent; `Forbidden` unless the session owns
    /// it.
    async fn delete_post(&self, session: Option<UserId>, id: &PostId) -> Result<(), Error>;
}
