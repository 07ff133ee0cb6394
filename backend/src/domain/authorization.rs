//! Ownership guard applied before every post mutation.

use crate::domain::{Error, Post, UserId};

/// Allow the mutation only when `session` names the post's author.
///
/// A missing session is treated like a foreign one.
///
/// # Examples
/// ```
/// use blog_backend::domain::{ensure_owner, ErrorCode, Post, PostDraft, PostId, UserId};
///
/// let owner = UserId::random();
/// let draft = PostDraft::try_from_parts::<&str>("Title", "Body", None, None).unwrap();
/// let post = Post::new(PostId::random(), owner.clone(), draft, chrono::Utc::now());
///
/// assert!(ensure_owner(Some(&owner), &post).is_ok());
/// let denied = ensure_owner(None, &post).unwrap_err();
/// assert_eq!(denied.code(), ErrorCode::Forbidden);
/// ```
pub fn ensure_owner(session: Option<&UserId>, post: &Post) -> Result<(), Error> {
    match session {
        Some(user_id) if user_id == post.author_id() => Ok(()),
        Some(_) => Err(Error::forbidden("only the author may modify this post")),
        None => Err(Error::forbidden("sign in to modify this post")),
    }
}
