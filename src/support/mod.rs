//! Support resolution and scoring layer
//!
//! # Modules
//!
//! - [`aggregator`]: Source fallback policy and the per-feature support cache
//! - [`score`]: Stable and full weighted scores per browser

pub mod aggregator;
pub mod score;

pub use aggregator::SupportAggregator;
pub use score::{calculate_all_scores, calculate_browser_score};
