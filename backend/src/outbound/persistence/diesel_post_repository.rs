//! PostgreSQL-backed [`PostRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{Post, PostId, PostSnapshot, UserId};

use super::diesel_error_mapping::{StoreFailure, from_db_count, to_db_count};
use super::models::{NewPostRow, PostChangeset, PostRow};
use super::pool::DbPool;
use super::schema::posts;

/// Diesel implementation of the [`PostRepository`] port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn fail<E: Into<StoreFailure>>(error: E) -> PostRepositoryError {
    match error.into() {
        StoreFailure::Connection(message) => PostRepositoryError::connection(message),
        StoreFailure::UniqueViolation => PostRepositoryError::query("post id already exists"),
        StoreFailure::Query(message) => PostRepositoryError::query(message),
    }
}

fn row_to_post(row: PostRow) -> Result<Post, PostRepositoryError> {
    let views_count = from_db_count(row.views_count).map_err(fail)?;
    Post::restore(PostSnapshot {
        id: PostId::from_uuid(row.id),
        author_id: UserId::from_uuid(row.author_id),
        title: row.title,
        text: row.text,
        tags: row.tags,
        image_url: row.image_url,
        views_count,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| PostRepositoryError::query(format!("stored post is invalid: {err}")))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let row = NewPostRow {
            id: *post.id().as_uuid(),
            title: post.title(),
            text: post.text(),
            tags: post.tags().as_slice(),
            image_url: post.image_url().map(AsRef::as_ref),
            author_id: *post.author_id().as_uuid(),
            views_count: to_db_count(post.views_count()).map_err(fail)?,
            created_at: post.created_at(),
            updated_at: post.updated_at(),
        };

        diesel::insert_into(posts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(fail)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let row = posts::table
            .find(*id.as_uuid())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(fail)?;
        row.map(row_to_post).transpose()
    }

    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let rows = posts::table
            .order((posts::created_at.desc(), posts::id.desc()))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(fail)?;
        rows.into_iter().map(row_to_post).collect()
    }

    async fn update(&self, post: &Post) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let changes = PostChangeset {
            title: post.title(),
            text: post.text(),
            tags: post.tags().as_slice(),
            image_url: post.image_url().map(AsRef::as_ref),
            updated_at: post.updated_at(),
        };
        let updated = diesel::update(posts::table.find(*post.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(fail)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let deleted = diesel::delete(posts::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(fail)?;
        Ok(deleted > 0)
    }

    async fn increment_views(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let row = diesel::update(posts::table.find(*id.as_uuid()))
            .set(posts::views_count.eq(posts::views_count + 1_i64))
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(fail)?;
        row.map(row_to_post).transpose()
    }
}
