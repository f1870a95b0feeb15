//! Configuration for the review pipeline.

use serde::{Deserialize, Serialize};

use crate::types::document::Stage;

/// Sampling-randomness settings per generation stage.
///
/// The structured stages default to the most deterministic setting so
/// their output stays parseable; the final review gets a higher setting
/// for more natural prose.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StageCreativity {
    pub category: f32,
    pub features: f32,
    pub details: f32,
    pub review: f32,
}

impl Default for StageCreativity {
    fn default() -> Self {
        Self {
            category: 0.0,
            features: 0.0,
            details: 0.0,
            review: 0.7,
        }
    }
}

impl StageCreativity {
    /// The creativity setting for a stage.
    pub fn for_stage(&self, stage: Stage) -> f32 {
        match stage {
            Stage::Category => self.category,
            Stage::Features => self.features,
            Stage::Details => self.details,
            Stage::Review => self.review,
        }
    }
}

/// How detail-text links are classified into buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMode {
    /// Section spans first; keyword fallback when sections find nothing
    /// but the text does contain URLs.
    #[default]
    Auto,

    /// Only the numbered-section spans of the details artifact.
    Sections,

    /// Whole-text URL collection, bucketed by URL keywords.
    Keywords,
}

/// Immutable configuration passed to the pipeline at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Chunk window size in characters.
    ///
    /// Default: 1000, large enough that common boilerplate page sections
    /// (headers, pricing blocks) survive intact in at least one window
    /// despite arbitrary split points.
    pub chunk_window: usize,

    /// Overlap between neighboring chunks in characters. Default: 200.
    pub chunk_overlap: usize,

    /// Chunks retrieved per stage question: enough to fill one prompt
    /// context, not the whole document. Default: 4.
    pub retrieval_k: usize,

    /// Per-stage creativity settings.
    pub creativity: StageCreativity,

    /// Link classification mode. Default: [`LinkMode::Auto`].
    pub link_mode: LinkMode,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            chunk_window: 1000,
            chunk_overlap: 200,
            retrieval_k: 4,
            creativity: StageCreativity::default(),
            link_mode: LinkMode::Auto,
        }
    }
}

impl ReviewConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk window size.
    pub fn with_chunk_window(mut self, window: usize) -> Self {
        self.chunk_window = window;
        self
    }

    /// Set the chunk overlap.
    pub fn with_chunk_overlap(mut self, overlap: usize) -> Self {
        self.chunk_overlap = overlap;
        self
    }

    /// Set the number of chunks retrieved per stage question.
    pub fn with_retrieval_k(mut self, k: usize) -> Self {
        self.retrieval_k = k;
        self
    }

    /// Set the per-stage creativity settings.
    pub fn with_creativity(mut self, creativity: StageCreativity) -> Self {
        self.creativity = creativity;
        self
    }

    /// Set the link classification mode.
    pub fn with_link_mode(mut self, mode: LinkMode) -> Self {
        self.link_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_creativity_matches_stage_roles() {
        let creativity = StageCreativity::default();
        assert_eq!(creativity.for_stage(Stage::Category), 0.0);
        assert_eq!(creativity.for_stage(Stage::Features), 0.0);
        assert_eq!(creativity.for_stage(Stage::Details), 0.0);
        assert!(creativity.for_stage(Stage::Review) > 0.0);
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = ReviewConfig::new()
            .with_chunk_window(500)
            .with_chunk_overlap(50)
            .with_retrieval_k(8)
            .with_link_mode(LinkMode::Keywords);

        assert_eq!(config.chunk_window, 500);
        assert_eq!(config.chunk_overlap, 50);
        assert_eq!(config.retrieval_k, 8);
        assert_eq!(config.link_mode, LinkMode::Keywords);
    }
}
