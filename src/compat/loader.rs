//! Loader trait for fetching the raw compatibility datasets

#[cfg(test)]
use mockall::automock;

use crate::compat::error::DatasetError;
use crate::compat::hierarchical::HierarchicalDataset;
use crate::compat::tabular::TabularDataset;

/// Trait for fetching the compatibility datasets from their source
///
/// Implementations validate the document shape before returning it, so a
/// successfully loaded dataset is always safe to hand to the resolvers.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DatasetLoader: Send + Sync {
    /// Fetches the per-browser, per-version tabular dataset
    async fn fetch_tabular(&self) -> Result<TabularDataset, DatasetError>;

    /// Fetches the per-API hierarchical dataset
    async fn fetch_hierarchical(&self) -> Result<HierarchicalDataset, DatasetError>;
}
