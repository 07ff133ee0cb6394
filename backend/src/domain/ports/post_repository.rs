//! Driven port for post persistence.

use async_trait::async_trait;

use crate::domain::{Post, PostId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Storage for posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post.
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// All posts, newest first.
    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Overwrite the mutable content of an existing post.
    ///
    /// Returns `false` when the post no longer exists.
    async fn update(&self, post: &Post) -> Result<bool, PostRepositoryError>;

    /// Remove a post. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &PostId) -> Result<bool, PostRepositoryError>;

    /// Atomically add one view and return the updated post.
    async fn increment_views(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError>;
}
