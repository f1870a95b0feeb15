//! The pipeline orchestrator.

use tracing::{debug, info};

use crate::chunker;
use crate::error::{Result, ReviewError};
use crate::extract;
use crate::index::RetrievalIndex;
use crate::pipeline::prompts;
use crate::render;
use crate::traits::ai::{Embedder, TextGenerator};
use crate::traits::loader::ContentLoader;
use crate::types::config::ReviewConfig;
use crate::types::document::{ReviewDocument, Stage, StageArtifact};

/// Orchestrates one review run.
///
/// Chunks the page text, builds a retrieval index over it, runs the four
/// generation stages in order (category → features → details → review),
/// parses the structured pieces out of the artifacts, and renders the
/// final document. One run owns its index and artifacts exclusively;
/// nothing is shared or reused across runs.
///
/// # Example
///
/// ```rust,ignore
/// use review::{HttpLoader, ReviewPipeline};
/// use review::ai::OpenAI;
///
/// let ai = OpenAI::from_env()?;
/// let pipeline = ReviewPipeline::new(ai.clone(), ai);
/// let doc = pipeline.review_url(&HttpLoader::new(), "https://elevenlabs.io").await?;
/// ```
pub struct ReviewPipeline<G: TextGenerator, E: Embedder> {
    generator: G,
    embedder: E,
    config: ReviewConfig,
}

impl<G: TextGenerator, E: Embedder> ReviewPipeline<G, E> {
    /// Create a pipeline with default configuration.
    pub fn new(generator: G, embedder: E) -> Self {
        Self {
            generator,
            embedder,
            config: ReviewConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(generator: G, embedder: E, config: ReviewConfig) -> Self {
        Self {
            generator,
            embedder,
            config,
        }
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Load a page through `loader` and review it.
    pub async fn review_url(
        &self,
        loader: &dyn ContentLoader,
        url: &str,
    ) -> Result<ReviewDocument> {
        let text = loader.load(url).await?;
        self.review(url, &text).await
    }

    /// Run the full pipeline over already-loaded document text.
    pub async fn review(&self, url: &str, document: &str) -> Result<ReviewDocument> {
        let chunks = chunker::split(document, self.config.chunk_window, self.config.chunk_overlap)?;
        info!(url = %url, chunks = chunks.len(), "building retrieval index");
        let index = RetrievalIndex::build(chunks, &self.embedder).await?;

        let category = self
            .run_stage(
                Stage::Category,
                prompts::CATEGORY_QUESTION,
                prompts::CATEGORY_PROMPT,
                &index,
            )
            .await?;
        let features = self
            .run_stage(
                Stage::Features,
                prompts::FEATURES_QUESTION,
                prompts::FEATURES_PROMPT,
                &index,
            )
            .await?;
        let details = self
            .run_stage(
                Stage::Details,
                prompts::DETAILS_QUESTION,
                prompts::DETAILS_PROMPT,
                &index,
            )
            .await?;
        let review = self
            .run_review_stage(url, &category, &features, &details)
            .await?;

        let parsed_features = extract::parse_features(&features.text);
        let link_buckets = extract::classify_links(&details.text, self.config.link_mode);

        let mut doc = ReviewDocument {
            url: url.to_string(),
            category: category.text,
            features: parsed_features,
            details: details.text,
            link_buckets,
            final_review: review.text,
            rendered_html: String::new(),
        };
        doc.rendered_html = render::render(&doc);

        info!(url = %url, "review complete");
        Ok(doc)
    }

    /// Run one retrieval-backed stage: question → top-k chunks → generate.
    async fn run_stage(
        &self,
        stage: Stage,
        question: &str,
        instruction: &str,
        index: &RetrievalIndex,
    ) -> Result<StageArtifact> {
        info!(stage = %stage, "running generation stage");

        let hits = index
            .query(question, self.config.retrieval_k, &self.embedder)
            .await
            .map_err(|e| ReviewError::stage(stage, e))?;
        debug!(stage = %stage, hits = hits.len(), "retrieved context");

        let context = hits
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let text = self
            .generator
            .generate(
                instruction,
                Some(&context),
                self.config.creativity.for_stage(stage),
            )
            .await
            .map_err(|e| ReviewError::stage(stage, e))?;

        Ok(StageArtifact::new(stage, text))
    }

    /// Run the final review stage over the three prior artifacts. No
    /// fresh retrieval.
    async fn run_review_stage(
        &self,
        url: &str,
        category: &StageArtifact,
        features: &StageArtifact,
        details: &StageArtifact,
    ) -> Result<StageArtifact> {
        let stage = Stage::Review;
        info!(stage = %stage, "running generation stage");

        let prompt =
            prompts::format_review_prompt(url, &category.text, &features.text, &details.text);

        let text = self
            .generator
            .generate(&prompt, None, self.config.creativity.for_stage(stage))
            .await
            .map_err(|e| ReviewError::stage(stage, e))?;

        Ok(StageArtifact::new(stage, text))
    }
}
