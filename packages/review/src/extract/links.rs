//! Link classification from the details artifact.

use std::collections::HashSet;

use indexmap::IndexSet;
use regex::Regex;
use tracing::{debug, warn};

use crate::types::config::LinkMode;
use crate::types::document::{BucketKind, LinkBucket};

/// Well-formed URLs: http/https scheme or a bare `www.` prefix.
const URL_PATTERN: &str = r#"https?://[^\s<>"]+|www\.[^\s<>"]+"#;

/// Extract every well-formed URL from `text`, deduplicated by exact
/// string match, first-seen order preserved.
pub fn extract_urls(text: &str) -> Vec<String> {
    let url = Regex::new(URL_PATTERN).unwrap();
    let mut seen: IndexSet<String> = IndexSet::new();
    for found in url.find_iter(text) {
        seen.insert(found.as_str().to_string());
    }
    seen.into_iter().collect()
}

/// Classify detail-text URLs into buckets.
///
/// `Sections` reads each bucket's numbered section span; `Keywords`
/// assigns every URL in the text to the first bucket whose keyword it
/// contains; `Auto` prefers sections and falls back to keywords when the
/// sections pass finds nothing while URLs are present.
///
/// Always returns one bucket per [`BucketKind`]; a bucket with no
/// matching header or no URLs is empty, not an error. A URL lands in at
/// most one bucket; URLs matching nothing join no bucket but remain
/// visible in the raw details text.
pub fn classify_links(text: &str, mode: LinkMode) -> Vec<LinkBucket> {
    match mode {
        LinkMode::Sections => classify_by_section(text),
        LinkMode::Keywords => classify_by_keyword(text),
        LinkMode::Auto => {
            let buckets = classify_by_section(text);
            if buckets.iter().all(|b| b.is_empty()) && !extract_urls(text).is_empty() {
                warn!("no section spans yielded links; falling back to keyword classification");
                return classify_by_keyword(text);
            }
            buckets
        }
    }
}

/// Find the span of a bucket's section: from its header (case-insensitive)
/// to the next numbered header or end of text.
fn section_span<'a>(text: &'a str, kind: BucketKind) -> Option<&'a str> {
    let header = Regex::new(&format!(
        r"(?i){}\s*:",
        regex::escape(kind.section_header())
    ))
    .unwrap();
    let found = header.find(text)?;

    let rest = &text[found.end()..];
    let next_header = Regex::new(r"\n\s*\d+\.").unwrap();
    let end = next_header.find(rest).map(|m| m.start()).unwrap_or(rest.len());
    Some(&rest[..end])
}

fn classify_by_section(text: &str) -> Vec<LinkBucket> {
    let mut claimed: HashSet<String> = HashSet::new();

    BucketKind::ALL
        .iter()
        .map(|&kind| {
            let urls: Vec<String> = match section_span(text, kind) {
                Some(span) => extract_urls(span)
                    .into_iter()
                    .filter(|url| claimed.insert(url.clone()))
                    .collect(),
                None => {
                    debug!(bucket = kind.label(), "section header not found");
                    Vec::new()
                }
            };
            LinkBucket { kind, urls }
        })
        .collect()
}

fn classify_by_keyword(text: &str) -> Vec<LinkBucket> {
    let mut buckets: Vec<LinkBucket> = BucketKind::ALL
        .iter()
        .map(|&kind| LinkBucket::empty(kind))
        .collect();

    for url in extract_urls(text) {
        let lower = url.to_lowercase();
        let claimant = buckets
            .iter_mut()
            .find(|b| b.kind.keywords().iter().any(|kw| lower.contains(kw)));
        match claimant {
            Some(bucket) => bucket.urls.push(url),
            None => debug!(url = %url, "URL matched no bucket keyword"),
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket<'a>(buckets: &'a [LinkBucket], kind: BucketKind) -> &'a LinkBucket {
        buckets.iter().find(|b| b.kind == kind).unwrap()
    }

    #[test]
    fn extract_urls_finds_both_schemes_and_www() {
        let urls = extract_urls("see https://a.com and http://b.com or www.c.com today");
        assert_eq!(urls, ["https://a.com", "http://b.com", "www.c.com"]);
    }

    #[test]
    fn extract_urls_deduplicates_in_first_seen_order() {
        let urls = extract_urls("https://a.com https://b.com https://a.com https://a.com");
        assert_eq!(urls, ["https://a.com", "https://b.com"]);
    }

    #[test]
    fn section_mode_keeps_buckets_separate() {
        let text = "Pricing Information:\n- Plan A\nPricing page URL: http://x.com/pricing\n2. Documentation:\nAPI Documentation URL: http://x.com/docs";
        let buckets = classify_links(text, LinkMode::Sections);

        assert_eq!(bucket(&buckets, BucketKind::Pricing).urls, ["http://x.com/pricing"]);
        assert_eq!(bucket(&buckets, BucketKind::Documentation).urls, ["http://x.com/docs"]);
        assert!(bucket(&buckets, BucketKind::Demo).is_empty());
        assert!(bucket(&buckets, BucketKind::Resources).is_empty());
    }

    #[test]
    fn section_mode_deduplicates_repeated_urls() {
        let text = "1. Pricing Information:\nPlans: http://x.com/pay\nAgain: http://x.com/pay\nOnce more: http://x.com/pay";
        let buckets = classify_links(text, LinkMode::Sections);
        assert_eq!(bucket(&buckets, BucketKind::Pricing).urls, ["http://x.com/pay"]);
    }

    #[test]
    fn missing_section_is_an_empty_bucket() {
        let buckets = classify_links("no structure at all, not even urls", LinkMode::Sections);
        assert!(buckets.iter().all(|b| b.is_empty()));
        assert_eq!(buckets.len(), BucketKind::ALL.len());
    }

    #[test]
    fn section_span_is_case_insensitive() {
        let text = "1. PRICING INFORMATION:\nhttp://x.com/buy\n2. demo/trial access:\nhttp://x.com/try";
        let buckets = classify_links(text, LinkMode::Sections);
        assert_eq!(bucket(&buckets, BucketKind::Pricing).urls, ["http://x.com/buy"]);
        assert_eq!(bucket(&buckets, BucketKind::Demo).urls, ["http://x.com/try"]);
    }

    #[test]
    fn a_url_joins_at_most_one_bucket() {
        // The documentation section repeats the pricing URL; pricing
        // claimed it first.
        let text = "1. Pricing Information:\nhttp://x.com/pricing\n2. Documentation:\nhttp://x.com/pricing\nhttp://x.com/docs";
        let buckets = classify_links(text, LinkMode::Sections);
        assert_eq!(bucket(&buckets, BucketKind::Pricing).urls, ["http://x.com/pricing"]);
        assert_eq!(bucket(&buckets, BucketKind::Documentation).urls, ["http://x.com/docs"]);
    }

    #[test]
    fn keyword_mode_buckets_by_priority() {
        let text = "https://x.com/pricing https://x.com/demo https://x.com/api https://x.com/guide https://x.com/about";
        let buckets = classify_links(text, LinkMode::Keywords);

        assert_eq!(bucket(&buckets, BucketKind::Pricing).urls, ["https://x.com/pricing"]);
        assert_eq!(bucket(&buckets, BucketKind::Demo).urls, ["https://x.com/demo"]);
        assert_eq!(bucket(&buckets, BucketKind::Documentation).urls, ["https://x.com/api"]);
        assert_eq!(bucket(&buckets, BucketKind::Resources).urls, ["https://x.com/guide"]);
        // /about matched nothing and joined no bucket.
        let total: usize = buckets.iter().map(|b| b.urls.len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn keyword_priority_prefers_earlier_buckets() {
        // Contains both "pricing" and "docs"; pricing wins.
        let buckets = classify_links("https://x.com/docs/pricing", LinkMode::Keywords);
        assert_eq!(bucket(&buckets, BucketKind::Pricing).urls, ["https://x.com/docs/pricing"]);
        assert!(bucket(&buckets, BucketKind::Documentation).is_empty());
    }

    #[test]
    fn auto_mode_prefers_sections() {
        let text = "1. Pricing Information:\nhttp://x.com/buy\nAlso mentioned: http://x.com/trial";
        let buckets = classify_links(text, LinkMode::Auto);
        // Sections found something, so the keyword pass never ran and the
        // trial URL (inside the pricing span) stayed with pricing.
        assert_eq!(
            bucket(&buckets, BucketKind::Pricing).urls,
            ["http://x.com/buy", "http://x.com/trial"]
        );
        assert!(bucket(&buckets, BucketKind::Demo).is_empty());
    }

    #[test]
    fn auto_mode_falls_back_to_keywords_for_garbled_headers() {
        let text = "Here are some links: https://x.com/pricing and https://x.com/trial";
        let buckets = classify_links(text, LinkMode::Auto);
        assert_eq!(bucket(&buckets, BucketKind::Pricing).urls, ["https://x.com/pricing"]);
        assert_eq!(bucket(&buckets, BucketKind::Demo).urls, ["https://x.com/trial"]);
    }

    #[test]
    fn auto_mode_without_urls_stays_empty() {
        let buckets = classify_links("nothing to see here", LinkMode::Auto);
        assert!(buckets.iter().all(|b| b.is_empty()));
    }
}
