//! Fixture dataset loader

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use compat_score::compat::error::DatasetError;
use compat_score::compat::hierarchical::HierarchicalDataset;
use compat_score::compat::loader::DatasetLoader;
use compat_score::compat::overrides::OverrideTable;
use compat_score::compat::tabular::TabularDataset;
use compat_score::compat::types::BrowserVersions;
use compat_score::support::SupportAggregator;

/// Loader serving in-memory documents and counting fetches
pub struct FixtureLoader {
    tabular: Option<Value>,
    hierarchical: Option<Value>,
    pub tabular_calls: AtomicUsize,
    pub hierarchical_calls: AtomicUsize,
}

impl FixtureLoader {
    pub fn new() -> Self {
        Self {
            tabular: None,
            hierarchical: None,
            tabular_calls: AtomicUsize::new(0),
            hierarchical_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_tabular(mut self, document: Value) -> Self {
        self.tabular = Some(document);
        self
    }

    pub fn with_hierarchical(mut self, document: Value) -> Self {
        self.hierarchical = Some(document);
        self
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.tabular_calls.load(Ordering::SeqCst),
            self.hierarchical_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl DatasetLoader for FixtureLoader {
    async fn fetch_tabular(&self) -> Result<TabularDataset, DatasetError> {
        self.tabular_calls.fetch_add(1, Ordering::SeqCst);
        match &self.tabular {
            Some(document) => TabularDataset::from_json(&document.to_string()),
            None => Err(DatasetError::Validation("no tabular fixture".to_string())),
        }
    }

    async fn fetch_hierarchical(&self) -> Result<HierarchicalDataset, DatasetError> {
        self.hierarchical_calls.fetch_add(1, Ordering::SeqCst);
        match &self.hierarchical {
            Some(document) => HierarchicalDataset::from_json(&document.to_string()),
            None => Err(DatasetError::Validation("no hierarchical fixture".to_string())),
        }
    }
}

/// Versions declared by [`tabular_agents`]
pub fn current_versions() -> BrowserVersions {
    BrowserVersions {
        chrome: "131".to_string(),
        firefox: "132".to_string(),
        safari: "17.5".to_string(),
    }
}

/// Agent metadata matching [`current_versions`]
pub fn tabular_agents() -> Value {
    json!({
        "and_chr": { "browser": "Chrome for Android", "current_version": "131", "version_list": [] },
        "and_ff": { "browser": "Firefox for Android", "current_version": "132", "version_list": [] },
        "ios_saf": {
            "browser": "Safari on iOS",
            "version_list": [
                { "version": "17.4", "release_date": 1_709_600_000 },
                { "version": "17.5", "release_date": 1_715_600_000 },
                { "version": "18.0", "release_date": null }
            ]
        }
    })
}

/// Aggregator over `loader` with the built-in overrides and a one-day TTL
pub fn create_test_aggregator(loader: Arc<FixtureLoader>) -> SupportAggregator {
    SupportAggregator::new(
        loader,
        Duration::from_secs(24 * 60 * 60),
        OverrideTable::builtin(),
        BrowserVersions {
            chrome: "1".to_string(),
            firefox: "1".to_string(),
            safari: "1".to_string(),
        },
    )
}
