//! Plan extraction adapters.

pub mod http;

pub use http::HttpExtractionClient;
