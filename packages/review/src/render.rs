//! HTML rendering of the finished review document.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::pipeline::prompts;
use crate::traits::ai::TextGenerator;
use crate::types::document::{Feature, LinkBucket, ReviewDocument};

/// Render the document to a standalone HTML page.
///
/// Pure except for the embedded generation timestamp; use
/// [`render_with_timestamp`] when byte-stable output matters.
pub fn render(doc: &ReviewDocument) -> String {
    render_with_timestamp(doc, Utc::now())
}

/// Deterministic render with an explicit generation timestamp.
///
/// Same document and timestamp always yield byte-identical output.
pub fn render_with_timestamp(doc: &ReviewDocument, generated_at: DateTime<Utc>) -> String {
    render_parts(doc, &doc.final_review, generated_at)
}

/// Render with an expanded narrative: asks the generator to summarize and
/// lengthen the final review before embedding it.
///
/// A rendering-time augmentation, not a pipeline stage. Skip it by
/// calling [`render`] instead. The pipeline's own render never touches
/// the generator.
pub async fn render_expanded<G>(
    doc: &ReviewDocument,
    generator: &G,
    creativity: f32,
) -> Result<String>
where
    G: TextGenerator + ?Sized,
{
    let prompt = prompts::format_expand_review_prompt(&doc.final_review);
    let expanded = generator.generate(&prompt, None, creativity).await?;
    Ok(render_parts(doc, &expanded, Utc::now()))
}

fn render_parts(doc: &ReviewDocument, review_text: &str, generated_at: DateTime<Utc>) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!(
        "<title>{} Review</title>\n",
        escape(&display_domain(&doc.url))
    ));
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    // Header
    html.push_str("<div class=\"header\">\n");
    html.push_str(&format!(
        "<h1>{} Review</h1>\n",
        escape(&display_domain(&doc.url))
    ));
    html.push_str(&format!(
        "<p><strong>Website:</strong> <a href=\"{}\" target=\"_blank\">{}</a></p>\n",
        escape(&doc.url),
        escape(&doc.url)
    ));
    html.push_str(&format!(
        "<p class=\"timestamp\">Generated on: {}</p>\n",
        generated_at.format("%B %d, %Y")
    ));
    html.push_str("</div>\n");

    section(&mut html, "Category", &text_block(&doc.category));
    section(&mut html, "Key Features", &features_html(&doc.features));
    section(&mut html, "Additional Details", &text_block(&doc.details));

    if doc.link_buckets.iter().any(|b| !b.is_empty()) {
        section(&mut html, "Quick Links", &quick_links_html(&doc.link_buckets));
    }

    section(&mut html, "Final Review", &text_block(review_text));

    html.push_str("</body>\n</html>\n");
    html
}

/// One collapsible section block.
fn section(html: &mut String, title: &str, body: &str) {
    html.push_str("<details class=\"section\" open>\n");
    html.push_str(&format!("<summary><h2>{}</h2></summary>\n", title));
    html.push_str(body);
    html.push_str("</details>\n");
}

fn features_html(features: &[Feature]) -> String {
    let mut html = String::new();
    for feature in features {
        html.push_str("<div class=\"feature\">\n");
        match &feature.url {
            Some(url) => html.push_str(&format!(
                "<h3><a href=\"{}\" target=\"_blank\">\u{1F517} {}</a></h3>\n",
                escape(url),
                escape(&feature.name)
            )),
            None => html.push_str(&format!("<h3>{}</h3>\n", escape(&feature.name))),
        }
        if !feature.body.is_empty() {
            html.push_str(&format!("<p>{}</p>\n", text_block(&feature.body)));
        }
        html.push_str("</div>\n");
    }
    html
}

fn quick_links_html(buckets: &[LinkBucket]) -> String {
    let mut html = String::from("<div class=\"links-container\">\n");
    for bucket in buckets {
        if bucket.is_empty() {
            continue;
        }
        html.push_str("<div class=\"link-section\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", bucket.kind.label()));
        for url in &bucket.urls {
            html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\">\u{1F517} {}</a><br>\n",
                escape(url),
                escape(url)
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
    html
}

/// Escaped text with newlines as line breaks.
fn text_block(text: &str) -> String {
    escape(text.trim()).replace('\n', "<br>\n")
}

/// Minimal HTML escaping for generated text.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Bare domain for display: scheme and path stripped.
fn display_domain(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| url.to_string())
}

const STYLE: &str = r#"body {
    font-family: Arial, sans-serif;
    line-height: 1.6;
    max-width: 1200px;
    margin: 0 auto;
    padding: 20px;
    color: #333;
}
.section {
    margin: 2rem 0;
    padding: 1rem;
    background: #f9f9f9;
    border-radius: 8px;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
}
.section summary {
    cursor: pointer;
    list-style: none;
}
.section summary h2 {
    display: inline;
}
.header {
    border-bottom: 2px solid #eee;
    margin-bottom: 2rem;
    padding-bottom: 1rem;
}
h1, h2 {
    color: #2c3e50;
}
a {
    color: #3498db;
    text-decoration: none;
}
a:hover {
    text-decoration: underline;
}
.feature {
    margin: 1rem 0;
    padding: 1rem;
    background: white;
    border-radius: 4px;
    box-shadow: 0 1px 3px rgba(0,0,0,0.05);
}
.links-container {
    display: flex;
    flex-wrap: wrap;
    gap: 2rem;
}
.timestamp {
    color: #666;
    font-size: 0.9em;
    margin-top: 1rem;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::document::{BucketKind, LinkBucket};
    use chrono::TimeZone;

    fn sample_document(buckets: Vec<LinkBucket>) -> ReviewDocument {
        ReviewDocument {
            url: "https://example.com/product".to_string(),
            category: "Category: Text-to-Speech".to_string(),
            features: vec![
                Feature {
                    name: "Voice Cloning".to_string(),
                    url: Some("https://example.com/cloning".to_string()),
                    body: "•instant cloning".to_string(),
                },
                Feature {
                    name: "Dubbing".to_string(),
                    url: None,
                    body: "•29 languages".to_string(),
                },
            ],
            details: "1. Pricing Information:\nhttps://example.com/pricing".to_string(),
            link_buckets: buckets,
            final_review: "A solid tool overall.".to_string(),
            rendered_html: String::new(),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn render_is_idempotent_modulo_timestamp() {
        let doc = sample_document(vec![LinkBucket {
            kind: BucketKind::Pricing,
            urls: vec!["https://example.com/pricing".to_string()],
        }]);
        let first = render_with_timestamp(&doc, fixed_time());
        let second = render_with_timestamp(&doc, fixed_time());
        assert_eq!(first, second);
    }

    #[test]
    fn renders_all_four_sections() {
        let doc = sample_document(vec![]);
        let html = render_with_timestamp(&doc, fixed_time());
        assert!(html.contains("<h2>Category</h2>"));
        assert!(html.contains("<h2>Key Features</h2>"));
        assert!(html.contains("<h2>Additional Details</h2>"));
        assert!(html.contains("<h2>Final Review</h2>"));
    }

    #[test]
    fn quick_links_omitted_when_all_buckets_empty() {
        let doc = sample_document(vec![
            LinkBucket::empty(BucketKind::Pricing),
            LinkBucket::empty(BucketKind::Documentation),
        ]);
        let html = render_with_timestamp(&doc, fixed_time());
        assert!(!html.contains("Quick Links"));
        assert!(!html.contains("links-container"));
    }

    #[test]
    fn quick_links_present_when_any_bucket_filled() {
        let doc = sample_document(vec![
            LinkBucket::empty(BucketKind::Pricing),
            LinkBucket {
                kind: BucketKind::Documentation,
                urls: vec!["https://example.com/docs".to_string()],
            },
        ]);
        let html = render_with_timestamp(&doc, fixed_time());
        assert!(html.contains("<h2>Quick Links</h2>"));
        assert!(html.contains("https://example.com/docs"));
        // The empty pricing bucket renders no label of its own.
        assert!(!html.contains("<h3>Pricing</h3>"));
    }

    #[test]
    fn linked_and_plain_features_render_differently() {
        let doc = sample_document(vec![]);
        let html = render_with_timestamp(&doc, fixed_time());
        assert!(html.contains("<a href=\"https://example.com/cloning\" target=\"_blank\">\u{1F517} Voice Cloning</a>"));
        assert!(html.contains("<h3>Dubbing</h3>"));
    }

    #[test]
    fn header_shows_bare_domain_and_full_url() {
        let doc = sample_document(vec![]);
        let html = render_with_timestamp(&doc, fixed_time());
        assert!(html.contains("<h1>example.com Review</h1>"));
        assert!(html.contains("href=\"https://example.com/product\""));
    }

    #[test]
    fn generated_text_is_escaped() {
        let mut doc = sample_document(vec![]);
        doc.category = "<script>alert('x')</script>".to_string();
        let html = render_with_timestamp(&doc, fixed_time());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn timestamp_appears_in_long_form() {
        let doc = sample_document(vec![]);
        let html = render_with_timestamp(&doc, fixed_time());
        assert!(html.contains("Generated on: June 01, 2024"));
    }

    #[tokio::test]
    async fn expanded_render_swaps_only_the_review_text() {
        use crate::testing::MockGenerator;

        let doc = sample_document(vec![]);
        let generator = MockGenerator::new()
            .with_reply("expand it into a longer", "A much longer narrative review.");

        let html = render_expanded(&doc, &generator, 0.7).await.unwrap();
        assert!(html.contains("A much longer narrative review."));
        assert!(!html.contains("A solid tool overall."));
        // The other sections are untouched.
        assert!(html.contains("<h2>Category</h2>"));
        assert!(html.contains("Voice Cloning"));

        // The expansion prompt carried the original review text.
        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("A solid tool overall."));
    }
}
