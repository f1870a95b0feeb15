//! HTTP content loader.
//!
//! Fetches a single page and reduces its HTML to readable text. Anchor
//! tags are kept as `[text](url)` so exact link URLs stay visible to the
//! retrieval and extraction stages downstream.

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::loader::ContentLoader;

/// Loads page text over HTTP.
///
/// Suitable for static pages; JavaScript-heavy sites need a rendering
/// loader behind the same trait.
pub struct HttpLoader {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpLoader {
    /// Create a loader with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "ReviewBot/1.0".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Reduce HTML to readable text, keeping anchor URLs.
    fn html_to_text(&self, html: &str) -> String {
        let mut text = html.to_string();

        // Drop non-content blocks entirely.
        for pattern in [
            r"(?is)<script[^>]*>.*?</script>",
            r"(?is)<style[^>]*>.*?</style>",
            r"(?is)<noscript[^>]*>.*?</noscript>",
        ] {
            text = Regex::new(pattern).unwrap().replace_all(&text, "").to_string();
        }

        // Keep link URLs visible in the extracted text.
        let anchor = Regex::new(r#"(?is)<a[^>]*href=["']([^"']+)["'][^>]*>(.*?)</a>"#).unwrap();
        text = anchor.replace_all(&text, "[$2]($1)").to_string();

        // List items become bullet lines.
        let item = Regex::new(r"(?is)<li[^>]*>(.*?)</li>").unwrap();
        text = item.replace_all(&text, "- $1\n").to_string();

        // Block-level closings become line breaks.
        let block = Regex::new(r"(?i)</(p|div|h[1-6]|section|article|tr)>|<br\s*/?>").unwrap();
        text = block.replace_all(&text, "\n").to_string();

        // Strip every remaining tag.
        let tag = Regex::new(r"<[^>]+>").unwrap();
        text = tag.replace_all(&text, " ").to_string();

        // Decode the common entities.
        text = text
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        // Collapse runs of blank space.
        let spaces = Regex::new(r"[ \t]{2,}").unwrap();
        text = spaces.replace_all(&text, " ").to_string();
        let newlines = Regex::new(r"\n{3,}").unwrap();
        text = newlines.replace_all(&text, "\n\n").to_string();

        text.trim().to_string()
    }

    /// Extract the page title, if any.
    fn extract_title(&self, html: &str) -> Option<String> {
        let title = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok()?;
        title
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

#[async_trait]
impl ContentLoader for HttpLoader {
    async fn load(&self, url: &str) -> FetchResult<String> {
        if url::Url::parse(url).is_err() {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
            });
        }

        debug!(url = %url, "fetching page");
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Http(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("HTTP {}", status),
            ))));
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let title = self.extract_title(&html);
        let body = self.html_to_text(&html);

        if body.is_empty() {
            return Err(FetchError::EmptyDocument {
                url: url.to_string(),
            });
        }

        debug!(url = %url, chars = body.len(), "page text extracted");
        Ok(match title {
            Some(title) => format!("{}\n\n{}", title, body),
            None => body,
        })
    }
}
