//! Retrieval-Augmented Website Review Pipeline
//!
//! Produces a structured, multi-section review of a product website. The
//! page text is chunked and indexed for similarity retrieval, then run
//! through four ordered generation stages (categorize → features →
//! details → final review). The free-text stage output is parsed into
//! typed features and categorized links and rendered to a shareable HTML
//! report plus a flat record for persistence.
//!
//! # Design Philosophy
//!
//! The generation and embedding services are black boxes behind small
//! capability traits; extraction from their free-text output is
//! best-effort by contract; missing links or unparsed features degrade
//! gracefully, they never fail a run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use review::{HttpLoader, ReviewPipeline};
//! use review::ai::OpenAI;
//!
//! let ai = OpenAI::from_env()?;
//! let pipeline = ReviewPipeline::new(ai.clone(), ai);
//! let doc = pipeline
//!     .review_url(&HttpLoader::new(), "https://elevenlabs.io")
//!     .await?;
//! println!("{}", doc.rendered_html);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - capability traits (TextGenerator, Embedder, ContentLoader)
//! - [`types`] - configuration and document types
//! - [`chunker`] / [`index`] - the retrieval side
//! - [`pipeline`] - the stage orchestrator and its prompts
//! - [`extract`] - free text → typed features and link buckets
//! - [`render`] - HTML assembly
//! - [`loaders`] - ContentLoader implementations
//! - [`testing`] - deterministic mocks

pub mod chunker;
pub mod error;
pub mod extract;
pub mod index;
pub mod loaders;
pub mod pipeline;
pub mod render;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{FetchError, Result, ReviewError};
pub use traits::{
    ai::{Embedder, TextGenerator},
    loader::{normalize_url, ContentLoader},
};
pub use types::{
    chunk::Chunk,
    config::{LinkMode, ReviewConfig, StageCreativity},
    document::{BucketKind, Feature, LinkBucket, ReviewDocument, Stage, StageArtifact},
};

// Re-export the pipeline entry point
pub use pipeline::ReviewPipeline;

pub use index::RetrievalIndex;
pub use loaders::HttpLoader;
pub use render::{render, render_expanded, render_with_timestamp};

// Re-export testing utilities
pub use testing::{MockEmbedder, MockGenerator, MockLoader};
