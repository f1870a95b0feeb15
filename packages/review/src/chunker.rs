//! Overlapping character-window chunking.
//!
//! Splitting is by character count, not tokens or words, to keep the
//! contract deterministic and language-agnostic. Offsets are Unicode
//! scalar values, so multi-byte text never splits mid-character.

use tracing::debug;

use crate::error::{ReviewError, Result};
use crate::types::chunk::Chunk;

/// Split `text` into overlapping windows of `window` characters.
///
/// Window `i` starts at character `i * (window - overlap)`; the last
/// window may be shorter than `window`. Empty input yields no chunks.
///
/// Fails with a configuration error unless `window > overlap >= 0`.
pub fn split(text: &str, window: usize, overlap: usize) -> Result<Vec<Chunk>> {
    if overlap >= window {
        return Err(ReviewError::Config {
            reason: format!(
                "chunk window ({}) must be greater than overlap ({})",
                window, overlap
            ),
        });
    }

    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let total = offsets.len();
    let stride = window - overlap;

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < total {
        let end = start + window;
        let byte_start = offsets[start];
        let byte_end = if end >= total { text.len() } else { offsets[end] };
        chunks.push(Chunk::new(&text[byte_start..byte_end], chunks.len()));
        if end >= total {
            break;
        }
        start += stride;
    }

    debug!(
        chars = total,
        window,
        overlap,
        chunks = chunks.len(),
        "document chunked"
    );
    Ok(chunks)
}
