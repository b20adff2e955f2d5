//! HTTP implementation of the dataset loader

use std::time::Duration;

use tracing::{info, warn};

use crate::compat::error::DatasetError;
use crate::compat::hierarchical::HierarchicalDataset;
use crate::compat::loader::DatasetLoader;
use crate::compat::tabular::TabularDataset;
use crate::config::DatasetsConfig;

/// Loader fetching both datasets over HTTP
pub struct HttpDatasetLoader {
    client: reqwest::Client,
    tabular_url: String,
    hierarchical_url: String,
}

impl HttpDatasetLoader {
    /// Creates a new HttpDatasetLoader for the configured dataset URLs
    pub fn new(config: &DatasetsConfig) -> Result<Self, DatasetError> {
        let client = reqwest::Client::builder()
            .user_agent("compat-score")
            .timeout(Duration::from_millis(config.timeout))
            .build()?;

        Ok(Self {
            client,
            tabular_url: config.tabular_url.clone(),
            hierarchical_url: config.hierarchical_url.clone(),
        })
    }

    /// Fetch a document body, mapping non-success statuses to errors
    async fn fetch_text(&self, url: &str) -> Result<String, DatasetError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Dataset source returned status {}: {}", status, url);
            return Err(DatasetError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        info!("Fetched {} bytes from {}", text.len(), url);
        Ok(text)
    }
}

#[async_trait::async_trait]
impl DatasetLoader for HttpDatasetLoader {
    async fn fetch_tabular(&self) -> Result<TabularDataset, DatasetError> {
        let text = self.fetch_text(&self.tabular_url).await?;
        TabularDataset::from_json(&text).inspect_err(|e| {
            warn!("Rejected tabular dataset from {}: {}", self.tabular_url, e)
        })
    }

    async fn fetch_hierarchical(&self) -> Result<HierarchicalDataset, DatasetError> {
        let text = self.fetch_text(&self.hierarchical_url).await?;
        HierarchicalDataset::from_json(&text).inspect_err(|e| {
            warn!(
                "Rejected hierarchical dataset from {}: {}",
                self.hierarchical_url, e
            )
        })
    }
}
