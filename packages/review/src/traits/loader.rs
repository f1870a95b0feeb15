//! Content loading boundary.
//!
//! The pipeline only needs the readable text of a single page; fetching,
//! HTML parsing, and network retries all live behind this trait.

use async_trait::async_trait;

use crate::error::FetchResult;

/// Loads the readable text of a page.
#[async_trait]
pub trait ContentLoader: Send + Sync {
    /// Fetch and extract document text for a URL.
    ///
    /// Must return non-empty text or fail with a [`FetchError`].
    ///
    /// [`FetchError`]: crate::error::FetchError
    async fn load(&self, url: &str) -> FetchResult<String>;
}

/// Prepend `https://` when the input carries no scheme.
///
/// Front ends call this before handing a user-supplied URL to the
/// pipeline, so `elevenlabs.io` and `https://elevenlabs.io` behave the
/// same.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_missing_scheme() {
        assert_eq!(normalize_url("elevenlabs.io"), "https://elevenlabs.io");
        assert_eq!(normalize_url("  example.com/pricing "), "https://example.com/pricing");
    }

    #[test]
    fn normalize_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }
}
