//! Absolute image locations attached to users and posts.

use std::fmt;

/// Maximum accepted URL length.
pub const IMAGE_URL_MAX: usize = 2048;

/// Validation errors for [`ImageUrl`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageUrlError {
    #[error("image url must not be empty")]
    Empty,
    #[error("image url must be at most {max} characters")]
    TooLong { max: usize },
    #[error("image url must be an absolute http or https address")]
    NotHttp,
}

/// Absolute `http`/`https` URL without whitespace.
///
/// Uploading the image itself is handled elsewhere; this type only records
/// where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Trim and validate an image location.
    pub fn new(url: impl AsRef<str>) -> Result<Self, ImageUrlError> {
        let trimmed = url.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ImageUrlError::Empty);
        }
        if trimmed.chars().count() > IMAGE_URL_MAX {
            return Err(ImageUrlError::TooLong { max: IMAGE_URL_MAX });
        }
        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or(ImageUrlError::NotHttp)?;
        if rest.is_empty() || rest.starts_with('/') || trimmed.chars().any(char::is_whitespace) {
            return Err(ImageUrlError::NotHttp);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Parse an optional raw value, treating blank input as absent.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, ImageUrlError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::new(value).map(Some),
        }
    }
}

impl AsRef<str> for ImageUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ImageUrl> for String {
    fn from(value: ImageUrl) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://cdn.example.com/a.png")]
    #[case("  http://localhost:4444/uploads/cat.jpg ")]
    fn accepts_http_urls(#[case] raw: &str) {
        let url = ImageUrl::new(raw).expect("valid url");
        assert_eq!(url.as_ref(), raw.trim());
    }

    #[rstest]
    #[case("", ImageUrlError::Empty)]
    #[case("/uploads/cat.jpg", ImageUrlError::NotHttp)]
    #[case("ftp://example.com/a.png", ImageUrlError::NotHttp)]
    #[case("https://", ImageUrlError::NotHttp)]
    #[case("https://exa mple.com/a.png", ImageUrlError::NotHttp)]
    fn rejects_invalid_urls(#[case] raw: &str, #[case] expected: ImageUrlError) {
        assert_eq!(ImageUrl::new(raw).expect_err("invalid url"), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   "))]
    fn blank_optional_is_absent(#[case] raw: Option<&str>) {
        assert_eq!(ImageUrl::parse_optional(raw).expect("parses"), None);
    }
}
