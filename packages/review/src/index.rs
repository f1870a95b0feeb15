//! Similarity index over the chunks of one document.

use tracing::debug;

use crate::error::Result;
use crate::traits::ai::Embedder;
use crate::types::chunk::Chunk;

/// Cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

struct IndexEntry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// Similarity index over the chunks of one document.
///
/// Built once per input document and discarded after the run; never
/// persisted, never mutated after build.
pub struct RetrievalIndex {
    entries: Vec<IndexEntry>,
}

impl RetrievalIndex {
    /// Embed every chunk and build the index.
    pub async fn build<E>(chunks: Vec<Chunk>, embedder: &E) -> Result<Self>
    where
        E: Embedder + ?Sized,
    {
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();

        Ok(Self { entries })
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retrieve the `k` chunks most similar to `question`, best match
    /// first. Ties are broken by original chunk order.
    pub async fn query<E>(&self, question: &str, k: usize, embedder: &E) -> Result<Vec<&Chunk>>
    where
        E: Embedder + ?Sized,
    {
        let query_embedding = embedder.embed(question).await?;

        let mut scored: Vec<(f32, &Chunk)> = self
            .entries
            .iter()
            .map(|e| (cosine_similarity(&query_embedding, &e.embedding), &e.chunk))
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.order.cmp(&b.1.order))
        });
        scored.truncate(k);

        debug!(question = %question, k, hits = scored.len(), "index queried");
        Ok(scored.into_iter().map(|(_, chunk)| chunk).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockEmbedder;

    fn chunk(text: &str, order: usize) -> Chunk {
        Chunk::new(text, order)
    }

    #[test]
    fn cosine_similarity_basics() {
        let a = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &[1.0, 0.0, 0.0]) - 1.0).abs() < 0.001);
        assert!(cosine_similarity(&a, &[0.0, 1.0, 0.0]).abs() < 0.001);
        assert!((cosine_similarity(&a, &[-1.0, 0.0, 0.0]) + 1.0).abs() < 0.001);
        assert_eq!(cosine_similarity(&a, &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[tokio::test]
    async fn query_ranks_by_similarity() {
        let embedder = MockEmbedder::new()
            .with_embedding("alpha", vec![1.0, 0.0, 0.0])
            .with_embedding("beta", vec![0.0, 1.0, 0.0])
            .with_embedding("gamma", vec![0.9, 0.1, 0.0])
            .with_embedding("question", vec![1.0, 0.0, 0.0]);

        let chunks = vec![chunk("alpha", 0), chunk("beta", 1), chunk("gamma", 2)];
        let index = RetrievalIndex::build(chunks, &embedder).await.unwrap();
        assert_eq!(index.len(), 3);

        let hits = index.query("question", 2, &embedder).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "alpha");
        assert_eq!(hits[1].text, "gamma");
    }

    #[tokio::test]
    async fn ties_break_by_chunk_order() {
        let same = vec![0.5, 0.5];
        let embedder = MockEmbedder::new()
            .with_embedding("first", same.clone())
            .with_embedding("second", same.clone())
            .with_embedding("question", same);

        let chunks = vec![chunk("second", 1), chunk("first", 0)];
        let index = RetrievalIndex::build(chunks, &embedder).await.unwrap();

        let hits = index.query("question", 2, &embedder).await.unwrap();
        assert_eq!(hits[0].order, 0);
        assert_eq!(hits[1].order, 1);
    }

    #[tokio::test]
    async fn query_on_empty_index_is_empty() {
        let embedder = MockEmbedder::new();
        let index = RetrievalIndex::build(Vec::new(), &embedder).await.unwrap();
        assert!(index.is_empty());
        let hits = index.query("anything", 3, &embedder).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn k_larger_than_index_returns_all() {
        let embedder = MockEmbedder::new();
        let chunks = vec![chunk("one", 0), chunk("two", 1)];
        let index = RetrievalIndex::build(chunks, &embedder).await.unwrap();
        let hits = index.query("one", 10, &embedder).await.unwrap();
        assert_eq!(hits.len(), 2);
    }
}
