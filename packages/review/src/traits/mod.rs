//! Capability traits consumed by the pipeline.
//!
//! Concrete implementations are injected at construction time; the
//! pipeline never selects a backend itself.

pub mod ai;
pub mod loader;
