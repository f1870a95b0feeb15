//! File persistence for finished reviews.
//!
//! Both formats land under `output/`, named `<domain>_<timestamp>`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use review::ReviewDocument;

fn file_stem(doc: &ReviewDocument) -> String {
    let domain = url::Url::parse(&doc.url)
        .ok()
        .and_then(|u| {
            u.host_str()
                .map(|h| h.trim_start_matches("www.").to_string())
        })
        .unwrap_or_else(|| "review".to_string());
    format!("{}_{}", domain, Utc::now().format("%Y%m%d_%H%M%S"))
}

/// Write the rendered HTML page to `output/html/`.
pub fn save_html(doc: &ReviewDocument) -> Result<PathBuf> {
    let dir = PathBuf::from("output/html");
    fs::create_dir_all(&dir).context("creating output/html")?;

    let path = dir.join(format!("{}.html", file_stem(doc)));
    fs::write(&path, &doc.rendered_html)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Write the flat JSON record to `output/json/`.
pub fn save_json(doc: &ReviewDocument) -> Result<PathBuf> {
    let dir = PathBuf::from("output/json");
    fs::create_dir_all(&dir).context("creating output/json")?;

    let record = doc.to_record(Utc::now());
    let path = dir.join(format!("{}.json", file_stem(doc)));
    fs::write(&path, serde_json::to_string_pretty(&record)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
