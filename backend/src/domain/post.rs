//! Post data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ImageUrl, ImageUrlError, UserId};

/// Minimum title length in characters.
pub const TITLE_MIN: usize = 3;
/// Maximum title length in characters.
pub const TITLE_MAX: usize = 256;
/// Minimum body length in characters.
pub const TEXT_MIN: usize = 3;
/// Maximum body length in characters.
pub const TEXT_MAX: usize = 100_000;
/// Maximum number of tags per post.
pub const TAGS_MAX: usize = 16;
/// Maximum length of a single tag.
pub const TAG_MAX: usize = 32;

/// Validation errors raised while building post components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    #[error("post id must be a valid UUID")]
    InvalidId,
    #[error("title must be between {min} and {max} characters")]
    TitleLength { min: usize, max: usize },
    #[error("text must be between {min} and {max} characters")]
    TextLength { min: usize, max: usize },
    #[error("at most {max} tags are allowed")]
    TooManyTags { max: usize },
    #[error("tags must be at most {max} characters")]
    TagTooLong { max: usize },
    #[error("image {0}")]
    ImageUrl(#[from] ImageUrlError),
}

impl PostValidationError {
    /// Name of the offending payload field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::TitleLength { .. } => "title",
            Self::TextLength { .. } => "text",
            Self::TooManyTags { .. } | Self::TagTooLong { .. } => "tags",
            Self::ImageUrl(_) => "imageUrl",
        }
    }
}

/// Stable post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Parse a post identifier from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PostValidationError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| PostValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn bounded(raw: &str, min: usize, max: usize) -> Option<String> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    (min..=max).contains(&length).then(|| trimmed.to_owned())
}

/// Ordered, de-duplicated tag list.
///
/// # Examples
/// ```
/// use blog_backend::domain::Tags;
///
/// let tags = Tags::new([" rust ", "web", "rust", ""]).unwrap();
/// assert_eq!(tags.as_slice(), ["rust", "web"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Trim each tag, drop blanks and repeats, then enforce the limits.
    pub fn new<I, S>(raw: I) -> Result<Self, PostValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = Vec::new();
        for tag in raw {
            let tag = tag.as_ref().trim();
            if tag.is_empty() || tags.iter().any(|existing| existing == tag) {
                continue;
            }
            if tag.chars().count() > TAG_MAX {
                return Err(PostValidationError::TagTooLong { max: TAG_MAX });
            }
            tags.push(tag.to_owned());
        }
        if tags.len() > TAGS_MAX {
            return Err(PostValidationError::TooManyTags { max: TAGS_MAX });
        }
        Ok(Self(tags))
    }

    /// Tags in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        self.0.as_slice()
    }

    /// Iterate over the tags.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Tags> for Vec<String> {
    fn from(value: Tags) -> Self {
        value.0
    }
}

/// Validated content for a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    text: String,
    tags: Tags,
    image_url: Option<ImageUrl>,
}

impl PostDraft {
    /// Validate raw post fields. Missing tags mean an empty tag list.
    pub fn try_from_parts<S: AsRef<str>>(
        title: &str,
        text: &str,
        tags: Option<&[S]>,
        image_url: Option<&str>,
    ) -> Result<Self, PostValidationError> {
        let title = bounded(title, TITLE_MIN, TITLE_MAX).ok_or(
            PostValidationError::TitleLength {
                min: TITLE_MIN,
                max: TITLE_MAX,
            },
        )?;
        let text = bounded(text, TEXT_MIN, TEXT_MAX).ok_or(PostValidationError::TextLength {
            min: TEXT_MIN,
            max: TEXT_MAX,
        })?;
        let tags = match tags {
            Some(raw) => Tags::new(raw)?,
            None => Tags::default(),
        };
        let image_url = ImageUrl::parse_optional(image_url)?;
        Ok(Self {
            title,
            text,
            tags,
            image_url,
        })
    }

    /// Trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Trimmed body.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Tag list.
    #[must_use]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Optional cover image.
    #[must_use]
    pub fn image_url(&self) -> Option<&ImageUrl> {
        self.image_url.as_ref()
    }
}

/// Validated replacement content for an existing post.
///
/// Title and text are always replaced. Tags and image are replaced only when
/// the caller supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    title: String,
    text: String,
    tags: Option<Tags>,
    image_url: Option<ImageUrl>,
}

impl PostChanges {
    /// Validate raw update fields.
    pub fn try_from_parts<S: AsRef<str>>(
        title: &str,
        text: &str,
        tags: Option<&[S]>,
        image_url: Option<&str>,
    ) -> Result<Self, PostValidationError> {
        let supplied_tags = tags.is_some();
        let draft = PostDraft::try_from_parts(title, text, tags, image_url)?;
        Ok(Self {
            title: draft.title,
            text: draft.text,
            tags: supplied_tags.then_some(draft.tags),
            image_url: draft.image_url,
        })
    }

    /// Replacement title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Replacement body.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Replacement tags, when supplied.
    #[must_use]
    pub fn tags(&self) -> Option<&Tags> {
        self.tags.as_ref()
    }

    /// Replacement image, when supplied.
    #[must_use]
    pub fn image_url(&self) -> Option<&ImageUrl> {
        self.image_url.as_ref()
    }
}

/// Persisted field values used to rebuild a [`Post`] from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSnapshot {
    /// Identifier.
    pub id: PostId,
    /// Owning user.
    pub author_id: UserId,
    /// Title.
    pub title: String,
    /// Body.
    pub text: String,
    /// Tags in insertion order.
    pub tags: Vec<String>,
    /// Optional cover image.
    pub image_url: Option<String>,
    /// Number of successful fetches.
    pub views_count: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Blog post.
///
/// ## Invariants
/// - `author_id` never changes after creation.
/// - `updated_at` is never earlier than `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    author_id: UserId,
    title: String,
    text: String,
    tags: Tags,
    image_url: Option<ImageUrl>,
    views_count: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a fresh post owned by `author_id`.
    #[must_use]
    pub fn new(id: PostId, author_id: UserId, draft: PostDraft, now: DateTime<Utc>) -> Self {
        let PostDraft {
            title,
            text,
            tags,
            image_url,
        } = draft;
        Self {
            id,
            author_id,
            title,
            text,
            tags,
            image_url,
            views_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a post from stored values, re-validating tag and URL content.
    pub fn restore(snapshot: PostSnapshot) -> Result<Self, PostValidationError> {
        let PostSnapshot {
            id,
            author_id,
            title,
            text,
            tags,
            image_url,
            views_count,
            created_at,
            updated_at,
        } = snapshot;
        Ok(Self {
            id,
            author_id,
            title,
            text,
            tags: Tags::new(tags)?,
            image_url: ImageUrl::parse_optional(image_url.as_deref())?,
            views_count,
            created_at,
            updated_at: updated_at.max(created_at),
        })
    }

    /// Apply an update, bumping `updated_at` to `now`.
    #[must_use]
    pub fn apply(mut self, changes: PostChanges, now: DateTime<Utc>) -> Self {
        let PostChanges {
            title,
            text,
            tags,
            image_url,
        } = changes;
        self.title = title;
        self.text = text;
        if let Some(tags) = tags {
            self.tags = tags;
        }
        if image_url.is_some() {
            self.image_url = image_url;
        }
        self.updated_at = now.max(self.created_at);
        self
    }

    /// Record one more view.
    #[must_use]
    pub fn viewed(mut self) -> Self {
        self.views_count = self.views_count.saturating_add(1);
        self
    }

    /// Replace the view counter, as tracked by a store.
    #[must_use]
    pub fn with_views_count(mut self, views_count: u64) -> Self {
        self.views_count = views_count;
        self
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Body.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Tags.
    #[must_use]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Optional cover image.
    #[must_use]
    pub fn image_url(&self) -> Option<&ImageUrl> {
        self.image_url.as_ref()
    }

    /// Number of successful fetches.
    #[must_use]
    pub fn views_count(&self) -> u64 {
        self.views_count
    }

    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Distinct tags ordered by the newest post carrying each one.
///
/// `posts` may be in any order; the result is capped at `limit` when given.
#[must_use]
pub fn recent_tags(posts: &[Post], limit: Option<usize>) -> Vec<String> {
    let mut ordered: Vec<&Post> = posts.iter().collect();
    ordered.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

    let mut tags: Vec<String> = Vec::new();
    for tag in ordered.iter().flat_map(|post| post.tags().iter()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_owned());
        }
    }
    if let Some(limit) = limit {
        tags.truncate(limit);
    }
    tags
}
