//! The review document and its building blocks.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One named step of the generation pipeline.
///
/// Stages run strictly in declaration order; later stages may consume
/// earlier artifacts as prompt input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Category,
    Features,
    Details,
    Review,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 4] = [
        Stage::Category,
        Stage::Features,
        Stage::Details,
        Stage::Review,
    ];

    /// Stable lowercase name, used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Category => "category",
            Stage::Features => "features",
            Stage::Details => "details",
            Stage::Review => "review",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The raw text output of one generation stage.
///
/// Produced exactly once per stage per run, in stage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageArtifact {
    pub stage: Stage,
    pub text: String,
}

impl StageArtifact {
    /// Create a new artifact.
    pub fn new(stage: Stage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }
}

/// A product feature parsed from the features artifact.
///
/// At most one URL per feature; order matches the ranking implied by the
/// generation output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub url: Option<String>,
    pub body: String,
}

/// A named category of extracted links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    Pricing,
    Demo,
    Documentation,
    Resources,
}

impl BucketKind {
    /// All buckets, in section order (also the keyword-mode priority).
    pub const ALL: [BucketKind; 4] = [
        BucketKind::Pricing,
        BucketKind::Demo,
        BucketKind::Documentation,
        BucketKind::Resources,
    ];

    /// Label shown in the rendered links section.
    pub fn label(&self) -> &'static str {
        match self {
            BucketKind::Pricing => "Pricing",
            BucketKind::Demo => "Demo & Trial",
            BucketKind::Documentation => "Documentation",
            BucketKind::Resources => "Resources",
        }
    }

    /// Section header the details stage is asked to emit for this bucket.
    pub fn section_header(&self) -> &'static str {
        match self {
            BucketKind::Pricing => "Pricing Information",
            BucketKind::Demo => "Demo/Trial Access",
            BucketKind::Documentation => "Documentation",
            BucketKind::Resources => "Additional Resources",
        }
    }

    /// Substrings that claim a URL for this bucket in keyword mode.
    ///
    /// Matched against the lowercased URL; first bucket wins.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            BucketKind::Pricing => &["pricing"],
            BucketKind::Demo => &["demo", "trial"],
            BucketKind::Documentation => &["doc", "api", "developer"],
            BucketKind::Resources => &["tutorial", "guide", "community", "support"],
        }
    }

    /// Key used for this bucket in the flat record.
    pub fn record_key(&self) -> &'static str {
        match self {
            BucketKind::Pricing => "pricing_links",
            BucketKind::Demo => "demo_links",
            BucketKind::Documentation => "documentation_links",
            BucketKind::Resources => "resource_links",
        }
    }
}

/// Extracted URLs for one bucket, deduplicated, first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkBucket {
    pub kind: BucketKind,
    pub urls: Vec<String>,
}

impl LinkBucket {
    /// Create an empty bucket.
    pub fn empty(kind: BucketKind) -> Self {
        Self {
            kind,
            urls: Vec::new(),
        }
    }

    /// Whether the bucket holds no URLs.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// The final aggregate of one pipeline run.
///
/// Every field except `rendered_html` is populated before rendering
/// begins; `rendered_html` is derived and never hand-edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDocument {
    /// The reviewed page URL (scheme-normalized)
    pub url: String,

    /// Raw category artifact text
    pub category: String,

    /// Features parsed from the features artifact
    pub features: Vec<Feature>,

    /// Raw details artifact text; keeps URLs that matched no bucket
    pub details: String,

    /// Classified links, one bucket per [`BucketKind`]
    pub link_buckets: Vec<LinkBucket>,

    /// Raw final-review artifact text
    pub final_review: String,

    /// Rendered HTML page
    pub rendered_html: String,
}

impl ReviewDocument {
    /// Flatten the document into a string-keyed record for persistence.
    ///
    /// Values are strings or arrays of strings only, insertion-ordered,
    /// so the record serializes as a flat JSON object.
    pub fn to_record(&self, generated_at: DateTime<Utc>) -> IndexMap<String, serde_json::Value> {
        let mut record = IndexMap::new();
        record.insert("url".to_string(), json!(self.url));
        record.insert("category".to_string(), json!(self.category));
        record.insert("details".to_string(), json!(self.details));
        record.insert("final_review".to_string(), json!(self.final_review));
        record.insert(
            "generated_at".to_string(),
            json!(generated_at.to_rfc3339()),
        );
        record.insert(
            "feature_names".to_string(),
            json!(self
                .features
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()),
        );
        for bucket in &self.link_buckets {
            record.insert(bucket.kind.record_key().to_string(), json!(bucket.urls));
        }
        record
    }
}
