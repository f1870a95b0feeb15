//! Feature parsing from the features artifact.

use regex::Regex;
use tracing::debug;

use crate::types::document::Feature;

/// Parse numbered feature entries out of free text.
///
/// Splits on `<digits>.` markers, discarding empty segments (including
/// the empty lead before `1.`). A segment carrying a markdown
/// `[name](url)` token yields a linked feature; otherwise its first line
/// becomes the name and the rest the body. Tolerates any entry count,
/// including zero. The upstream prompt targets three but nothing here
/// assumes it.
pub fn parse_features(text: &str) -> Vec<Feature> {
    let marker = Regex::new(r"\d+\.").unwrap();
    let link = Regex::new(r"\[(.*?)\]\((https?://[^\s)]+)\)").unwrap();

    let mut features = Vec::new();
    for segment in marker.split(text) {
        if segment.trim().is_empty() {
            continue;
        }

        let feature = match link.captures(segment) {
            Some(caps) => {
                let token = caps.get(0).unwrap().as_str();
                let name = caps.get(1).unwrap().as_str().trim().to_string();
                let url = caps.get(2).unwrap().as_str().to_string();
                let body = segment.replacen(token, "", 1);
                Feature {
                    name,
                    url: Some(url),
                    body: format_body(&body),
                }
            }
            None => {
                let trimmed = segment.trim();
                let mut lines = trimmed.lines();
                let name = lines.next().unwrap_or("").trim().to_string();
                let rest = lines.collect::<Vec<_>>().join("\n");
                Feature {
                    name,
                    url: None,
                    body: format_body(&rest),
                }
            }
        };
        features.push(feature);
    }

    debug!(count = features.len(), "parsed features");
    features
}

/// Normalize body lines: trim, turn `-` bullet markers into `•` glyphs,
/// drop blanks.
fn format_body(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_prefix('-') {
            Some(rest) => format!("•{}", rest.trim_start()),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
