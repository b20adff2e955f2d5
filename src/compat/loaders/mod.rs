//! Dataset loader implementations

pub mod http;

pub use http::HttpDatasetLoader;
