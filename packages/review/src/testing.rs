//! Mock implementations for tests and downstream callers.
//!
//! All mocks are deterministic and track their calls, so tests can assert
//! on pipeline behavior without real network or model calls.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::error::{FetchError, FetchResult, Result, ReviewError};
use crate::traits::ai::{Embedder, TextGenerator};
use crate::traits::loader::ContentLoader;

/// A scripted text generator.
///
/// Replies are selected by prompt substring, first match wins; unmatched
/// prompts get a deterministic placeholder. Substrings registered with
/// [`fail_when`](MockGenerator::fail_when) make the call fail instead.
///
/// Clones share scripted replies and call history, so a clone kept
/// outside the pipeline can assert on calls after the run.
#[derive(Default, Clone)]
pub struct MockGenerator {
    /// (needle, reply) pairs matched against the prompt in order
    replies: Arc<RwLock<Vec<(String, String)>>>,

    /// Prompt substrings that trigger a generation failure
    failures: Arc<RwLock<Vec<String>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<GeneratorCall>>>,
}

/// Record of a call made to the mock generator.
#[derive(Debug, Clone)]
pub struct GeneratorCall {
    pub prompt: String,
    pub has_context: bool,
    pub creativity: f32,
}

impl MockGenerator {
    /// Create a new mock generator with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `reply` whenever the prompt contains `needle`.
    pub fn with_reply(self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.replies
            .write()
            .unwrap()
            .push((needle.into(), reply.into()));
        self
    }

    /// Fail whenever the prompt contains `needle`.
    pub fn fail_when(self, needle: impl Into<String>) -> Self {
        self.failures.write().unwrap().push(needle.into());
        self
    }

    /// All calls made to this mock.
    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        prompt: &str,
        context: Option<&str>,
        creativity: f32,
    ) -> Result<String> {
        self.calls.write().unwrap().push(GeneratorCall {
            prompt: prompt.to_string(),
            has_context: context.is_some(),
            creativity,
        });

        if self
            .failures
            .read()
            .unwrap()
            .iter()
            .any(|needle| prompt.contains(needle))
        {
            return Err(ReviewError::Generation("mock generation failure".into()));
        }

        Ok(self
            .replies
            .read()
            .unwrap()
            .iter()
            .find(|(needle, _)| prompt.contains(needle))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| format!("Generated text for a {}-char prompt", prompt.len())))
    }
}

/// A deterministic embedder.
///
/// Unknown texts get a sha256-seeded embedding, so equal inputs always
/// embed equally and distinct inputs (almost) never collide.
#[derive(Clone)]
pub struct MockEmbedder {
    /// Predefined embeddings by exact text
    embeddings: Arc<RwLock<HashMap<String, Vec<f32>>>>,

    /// Dimension of generated embeddings
    embedding_dim: usize,

    /// Number of embed calls made
    calls: Arc<RwLock<usize>>,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self {
            embeddings: Arc::default(),
            embedding_dim: 64,
            calls: Arc::default(),
        }
    }
}

impl MockEmbedder {
    /// Create a new mock embedder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated embedding dimension.
    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    /// Pin the embedding for an exact text.
    pub fn with_embedding(self, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        self.embeddings
            .write()
            .unwrap()
            .insert(text.into(), embedding);
        self
    }

    /// Number of embed calls made so far.
    pub fn call_count(&self) -> usize {
        *self.calls.read().unwrap()
    }

    fn deterministic_embedding(&self, text: &str) -> Vec<f32> {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let hash = hasher.finalize();

        (0..self.embedding_dim)
            .map(|i| {
                let byte = hash[i % 32] as f32;
                (byte / 127.5) - 1.0
            })
            .collect()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        *self.calls.write().unwrap() += 1;
        Ok(self
            .embeddings
            .read()
            .unwrap()
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.deterministic_embedding(text)))
    }
}

/// A content loader serving predefined pages.
#[derive(Default, Clone)]
pub struct MockLoader {
    /// Predefined page text by URL
    pages: Arc<RwLock<HashMap<String, String>>>,

    /// URLs that should fail
    fail_urls: Arc<RwLock<Vec<String>>>,
}

impl MockLoader {
    /// Create a new mock loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` for `url`.
    pub fn with_page(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), text.into());
        self
    }

    /// Mark a URL as failing.
    pub fn fail_url(self, url: impl Into<String>) -> Self {
        self.fail_urls.write().unwrap().push(url.into());
        self
    }
}

#[async_trait]
impl ContentLoader for MockLoader {
    async fn load(&self, url: &str) -> FetchResult<String> {
        if self.fail_urls.read().unwrap().iter().any(|u| u == url) {
            return Err(FetchError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "mock connection refused",
            ))));
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::InvalidUrl {
                url: url.to_string(),
            })
    }
}
