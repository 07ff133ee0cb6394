//! Driving port for reading posts.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostId};

/// Read-side post use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, Error>;

    /// Distinct tags ordered by the newest post carrying them.
    async fn list_tags(&self, limit: Option<usize>) -> Result<Vec<String>, Error>;

    /// Fetch one post and count the view.
    ///
    /// # Errors
    /// `NotFound` when no post has this id.
    async fn get_post(&self, id: &PostId) -> Result<Post, Error>;
}
