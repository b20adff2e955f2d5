//! Mobile browser compatibility resolution and scoring
//!
//! - [`compat`]: dataset loading, caching and per-source resolution
//! - [`support`]: source fallback, the support cache and scoring
//! - [`catalog`]: the feature catalog consumed by both
//! - [`config`]: configuration and data paths

pub mod catalog;
pub mod compat;
pub mod config;
pub mod logging;
pub mod support;
