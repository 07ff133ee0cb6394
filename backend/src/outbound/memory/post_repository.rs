//! In-memory [`PostRepository`].

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{Post, PostId};

use super::poisoned;

/// Posts held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error() -> PostRepositoryError {
    PostRepositoryError::query(poisoned("post"))
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let mut posts = self.posts.write().map_err(|_| lock_error())?;
        if posts.contains_key(&post.id()) {
            return Err(PostRepositoryError::query("post id already exists"));
        }
        posts.insert(post.id(), post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        let posts = self.posts.read().map_err(|_| lock_error())?;
        Ok(posts.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let posts = self.posts.read().map_err(|_| lock_error())?;
        let mut listed: Vec<Post> = posts.values().cloned().collect();
        listed.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_uuid().cmp(a.id().as_uuid()))
        });
        Ok(listed)
    }

    async fn update(&self, post: &Post) -> Result<bool, PostRepositoryError> {
        let mut posts = self.posts.write().map_err(|_| lock_error())?;
        match posts.get_mut(&post.id()) {
            Some(stored) => {
                *stored = post.clone().with_views_count(stored.views_count());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &PostId) -> Result<bool, PostRepositoryError> {
        let mut posts = self.posts.write().map_err(|_| lock_error())?;
        Ok(posts.remove(id).is_some())
    }

    async fn increment_views(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut posts = self.posts.write().map_err(|_| lock_error())?;
        let Some(stored) = posts.remove(id) else {
            return Ok(None);
        };
        let viewed = stored.viewed();
        posts.insert(*id, viewed.clone());
        Ok(Some(viewed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PostChanges, PostDraft, UserId};
    use chrono::{Duration, Utc};

    fn post(title: &str, age: Duration) -> Post {
        let draft =
            PostDraft::try_from_parts::<&str>(title, "Body text", None, None).expect("valid draft");
        Post::new(PostId::random(), UserId::random(), draft, Utc::now() - age)
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = InMemoryPostRepository::new();
        let older = post("Older", Duration::hours(2));
        let newer = post("Newer", Duration::hours(1));
        repo.insert(&older).await.expect("insert");
        repo.insert(&newer).await.expect("insert");

        let titles: Vec<String> = repo
            .list()
            .await
            .expect("list")
            .iter()
            .map(|post| post.title().to_owned())
            .collect();

        assert_eq!(titles, ["Newer", "Older"]);
    }

    #[tokio::test]
    async fn increment_views_is_cumulative() {
        let repo = InMemoryPostRepository::new();
        let stored = post("Counted", Duration::zero());
        repo.insert(&stored).await.expect("insert");

        repo.increment_views(&stored.id()).await.expect("first view");
        let second = repo
            .increment_views(&stored.id())
            .await
            .expect("second view")
            .expect("post exists");

        assert_eq!(second.views_count(), 2);
        assert!(
            repo.increment_views(&PostId::random())
                .await
                .expect("lookup")
                .is_none()
        );
    }

    #[tokio::test]
    async fn update_keeps_view_count() {
        let repo = InMemoryPostRepository::new();
        let stored = post("Original", Duration::zero());
        repo.insert(&stored).await.expect("insert");
        repo.increment_views(&stored.id()).await.expect("view");

        let changes = PostChanges::try_from_parts::<&str>("Edited", "Edited body", None, None)
            .expect("valid changes");
        let edited = stored.apply(changes, Utc::now());
        assert!(repo.update(&edited).await.expect("update"));

        let reloaded = repo
            .find_by_id(&edited.id())
            .await
            .expect("lookup")
            .expect("post exists");
        assert_eq!(reloaded.title(), "Edited");
        assert_eq!(reloaded.views_count(), 1);
    }
}
