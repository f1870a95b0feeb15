//! Content loader implementations.

pub mod http;

pub use http::HttpLoader;
