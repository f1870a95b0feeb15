//! Prompt templates for the generation stages.
//!
//! The templates spell out the output format the structured extractor
//! expects downstream. The format is a convention enforced only by prompt
//! wording, not a verifiable schema, so extraction stays tolerant of
//! deviations.

/// Retrieval question posed to the index for the category stage.
pub const CATEGORY_QUESTION: &str = "categorize this product";

/// Retrieval question posed to the index for the features stage.
pub const FEATURES_QUESTION: &str = "analyze features with urls";

/// Retrieval question posed to the index for the details stage.
pub const DETAILS_QUESTION: &str = "extract details and links";

/// Instruction for the category stage.
pub const CATEGORY_PROMPT: &str = r#"Based on the provided context, categorize this product:
1. Main category (e.g., Text-to-Speech, Image Generation, etc.)
2. Subcategories if applicable
3. Primary use cases

Provide a concise categorization."#;

/// Instruction for the features stage.
///
/// The numbered `[name](url)` shape is what the feature parser looks for.
pub const FEATURES_PROMPT: &str = r#"Based on the provided context, identify and explain the top 3 features of this product.
For each feature, include its URL if available in the context.
Format your response exactly as follows:

1. [Feature Name](URL if available)
- What makes it powerful/unique
- What problems it solves
- Key capabilities

2. [Feature Name](URL if available)
- What makes it powerful/unique
- What problems it solves
- Key capabilities

3. [Feature Name](URL if available)
- What makes it powerful/unique
- What problems it solves
- Key capabilities

Important:
- Only include URLs if they directly relate to the feature
- URLs must be complete (starting with http:// or https://)
- If no URL exists for a feature, just list the feature name"#;

/// Instruction for the details stage.
///
/// The numbered section headers are what the link classifier looks for.
pub const DETAILS_PROMPT: &str = r#"You are a detail-oriented researcher. Based on the provided context about this product,
extract EXACT URLs and information for each category. Format your response exactly as follows:

1. Pricing Information:
- List each pricing tier and cost
- Pricing page URL: [extract exact URL from context]

2. Demo/Trial Access:
- Trial availability details
- Demo/Trial URL: [extract exact URL from context]

3. Documentation:
- API Documentation URL: [extract exact URL from context]
- Getting Started URL: [extract exact URL from context]
- Developer Docs URL: [extract exact URL from context]

4. Additional Resources:
- Tutorial URL: [extract exact URL from context]
- Community/Support URL: [extract exact URL from context]
- Integration Guide URL: [extract exact URL from context]

Important:
- Include COMPLETE URLs (starting with http:// or https://)
- Place each URL on a new line after its description
- If a URL is not found in the context, skip that item
- Do not make up or modify URLs, only use exact URLs found in the context"#;

/// Template for the final review stage. Consumes the three prior
/// artifacts verbatim plus the page URL; no fresh retrieval.
pub const REVIEW_PROMPT: &str = r#"Write a comprehensive but easy-to-read review of this product in a human-like tone.
Include the following information in a natural way:

Website: {url}
Category: {category}
Key Features: {features}
Additional Details: {details}

Make it sound like a helpful friend reviewing the product, highlighting both strengths
and potential considerations. Keep it informative but conversational."#;

/// Template for the expanded-narrative rendering variant.
pub const EXPAND_REVIEW_PROMPT: &str = r#"Summarize the key points of the review below, then expand it into a longer,
more detailed narrative that covers each point in depth. Keep the same
friendly, conversational tone.

Review:
{review}"#;

/// Fill the review template with the prior artifacts.
pub fn format_review_prompt(url: &str, category: &str, features: &str, details: &str) -> String {
    REVIEW_PROMPT
        .replace("{url}", url)
        .replace("{category}", category)
        .replace("{features}", features)
        .replace("{details}", details)
}

/// Fill the expansion template with the finished review text.
pub fn format_expand_review_prompt(review: &str) -> String {
    EXPAND_REVIEW_PROMPT.replace("{review}", review)
}
