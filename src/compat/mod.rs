//! Compatibility data layer
//!
//! This module fetches, caches and interprets the two external compatibility
//! datasets, normalizing both into one [`status::SupportLevel`] taxonomy.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │   Loader    │────▶│    Store    │◀────│  Resolvers   │
//! │   (fetch)   │     │  (dedup +   │     │ (tabular,    │
//! └─────────────┘     │   ttl)      │     │ hierarchical)│
//!        │            └─────────────┘     └──────────────┘
//!        ▼                                       │
//! ┌─────────────┐                         ┌─────────────┐
//! │   Loaders   │                         │   Version   │
//! │   (http)    │                         │ (comparator)│
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error types for dataset loading and validation
//! - [`hierarchical`]: Per-API dataset schema and resolver
//! - [`loader`]: Loader trait for fetching datasets from remote sources
//! - [`loaders`]: Concrete loader implementations (HTTP)
//! - [`overrides`]: Hand-maintained support for features absent from both datasets
//! - [`status`]: Support taxonomy and status code parsing
//! - [`store`]: In-memory dataset cache with request deduplication
//! - [`tabular`]: Per-version dataset schema, column matching and resolver
//! - [`types`]: Common types like `BrowserSupport`
//! - [`version`]: Version string comparison

pub mod error;
pub mod hierarchical;
pub mod loader;
pub mod loaders;
pub mod overrides;
pub mod status;
pub mod store;
pub mod tabular;
pub mod types;
pub mod version;
