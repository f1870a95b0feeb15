//! Typed errors for the review library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep failures
//! strongly typed and composable at the crate boundary.

use thiserror::Error;

use crate::types::document::Stage;

/// Errors that can occur while producing a review.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Content loading failed before the pipeline started
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Invalid chunking parameters
    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    /// A generation or retrieval call failed mid-pipeline.
    ///
    /// Fatal to the run; no partial document is produced. Retries, if
    /// desired, are the caller's responsibility.
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<ReviewError>,
    },

    /// Generation service unavailable or failed
    #[error("generation service error: {0}")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Embedding service unavailable or failed
    #[error("embedding service error: {0}")]
    Embedding(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ReviewError {
    /// Wrap a mid-pipeline failure with the stage it occurred in.
    pub fn stage(stage: Stage, cause: ReviewError) -> Self {
        ReviewError::Stage {
            stage,
            source: Box::new(cause),
        }
    }
}

/// Errors that can occur while loading page content.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// The page yielded no readable text
    #[error("no readable text at: {url}")]
    EmptyDocument { url: String },
}

/// Result type alias for review operations.
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Result type alias for content loading.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_error_names_the_stage() {
        let cause = ReviewError::Generation("connection refused".into());
        let err = ReviewError::stage(Stage::Details, cause);
        let message = err.to_string();
        assert!(message.contains("details"));
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn fetch_error_converts_into_review_error() {
        let fetch = FetchError::EmptyDocument {
            url: "https://example.com".to_string(),
        };
        let err: ReviewError = fetch.into();
        assert!(matches!(err, ReviewError::Fetch(_)));
    }
}
