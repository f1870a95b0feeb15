//! Generation and embedding capability traits.
//!
//! Both services are black boxes to the pipeline: it depends only on
//! "prompt in, text out" and "text in, vector out". Implementations wrap
//! specific providers (OpenAI, local models, mocks) and own provider
//! concerns such as retry and backoff. The pipeline never retries.

use async_trait::async_trait;

use crate::error::Result;

/// Text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for an instruction prompt with optional retrieved
    /// context.
    ///
    /// `creativity` is the sampling-randomness setting: `0.0` requests the
    /// most deterministic output, higher values more varied prose.
    async fn generate(
        &self,
        prompt: &str,
        context: Option<&str>,
        creativity: f32,
    ) -> Result<String>;
}

/// Embedding capability for semantic similarity search.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    ///
    /// Implementations with a batch endpoint should override this.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }
}
