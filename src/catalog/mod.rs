//! Feature catalog: the static list of features to resolve and score
//!
//! # Modules
//!
//! - [`types`]: Feature, category and group records
//! - [`validate`]: Loading from JSON and fail-fast validation

pub mod types;
pub mod validate;

pub use types::{Feature, FeatureCatalog};
pub use validate::CatalogError;
