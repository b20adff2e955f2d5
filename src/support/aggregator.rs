//! Support aggregation: source fallback and the per-feature support cache
//!
//! The aggregator is the single owner of resolved support. It consults the
//! hierarchical dataset first (it carries standardization status), falls back
//! to the tabular dataset (broader coverage), and finally to the manual
//! override table. A source only counts when it knows at least one browser.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::catalog::Feature;
use crate::compat::error::DatasetError;
use crate::compat::hierarchical::resolve_hierarchical;
use crate::compat::loader::DatasetLoader;
use crate::compat::loaders::HttpDatasetLoader;
use crate::compat::overrides::OverrideTable;
use crate::compat::status::SupportLevel;
use crate::compat::store::DatasetStore;
use crate::compat::tabular::{derive_browser_versions, is_universally_supported, resolve_tabular};
use crate::compat::types::{BrowserSupport, BrowserVersions};
use crate::config::Config;

/// Resolution context owning the dataset store and the support cache
pub struct SupportAggregator {
    store: DatasetStore,
    overrides: OverrideTable,
    fallback_versions: BrowserVersions,
    versions: OnceCell<BrowserVersions>,
    cache: RwLock<HashMap<String, BrowserSupport>>,
}

/// Key a feature's support is cached under
///
/// A feature with both identifiers is only ever cached under its tabular id.
pub fn cache_key<'a>(
    feature_id: &'a str,
    tabular_id: Option<&'a str>,
    hierarchical_path: Option<&'a str>,
) -> &'a str {
    tabular_id.or(hierarchical_path).unwrap_or(feature_id)
}

impl SupportAggregator {
    pub fn new(
        loader: Arc<dyn DatasetLoader>,
        ttl: Duration,
        overrides: OverrideTable,
        fallback_versions: BrowserVersions,
    ) -> Self {
        Self {
            store: DatasetStore::new(loader, ttl),
            overrides,
            fallback_versions,
            versions: OnceCell::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Build an aggregator fetching datasets over HTTP with the built-in overrides
    pub fn from_config(config: &Config) -> Result<Self, DatasetError> {
        let loader = HttpDatasetLoader::new(&config.datasets)?;
        Ok(Self::new(
            Arc::new(loader),
            Duration::from_millis(config.cache.ttl),
            OverrideTable::builtin(),
            config.fallback_versions.clone().into(),
        ))
    }

    /// Cached support for a feature, or all-unknown if it has not been resolved
    pub fn get_support(&self, feature: &Feature) -> BrowserSupport {
        self.cached(cache_key(
            &feature.id,
            feature.tabular_id.as_deref(),
            feature.hierarchical_path.as_deref(),
        ))
        .unwrap_or_default()
    }

    /// Resolve a feature's support and cache it
    pub async fn load_support(&self, feature: &Feature) -> BrowserSupport {
        self.resolve(
            &feature.id,
            feature.tabular_id.as_deref(),
            feature.hierarchical_path.as_deref(),
        )
        .await
    }

    /// Resolve several features concurrently
    pub async fn load_multiple_support<'a, I>(&self, features: I) -> Vec<BrowserSupport>
    where
        I: IntoIterator<Item = &'a Feature>,
    {
        join_all(features.into_iter().map(|feature| self.load_support(feature))).await
    }

    /// Resolve support from the available identifiers
    ///
    /// Never fails: sources that error or know nothing are skipped, and the
    /// result may be all-unknown.
    pub async fn resolve(
        &self,
        feature_id: &str,
        tabular_id: Option<&str>,
        hierarchical_path: Option<&str>,
    ) -> BrowserSupport {
        let key = cache_key(feature_id, tabular_id, hierarchical_path);
        if let Some(cached) = self.cached(key) {
            return cached;
        }

        if tabular_id.is_none() && hierarchical_path.is_none() {
            debug!("{} has no dataset identifiers, using override table", feature_id);
            return self.insert(key, self.overrides.resolve(feature_id));
        }

        let versions = self.browser_versions().await;

        if let Some(path) = hierarchical_path
            && let Some(support) = self.from_hierarchical(path, versions).await
        {
            return self.insert(key, support);
        }

        if let Some(tabular_id) = tabular_id
            && let Some(support) = self.from_tabular(tabular_id, versions).await
        {
            return self.insert(key, support);
        }

        let support = self.overrides.resolve(feature_id);
        if !support.is_conclusive() {
            info!("No support data found for {}", feature_id);
        }
        self.insert(key, support)
    }

    /// Current browser versions, derived on first use
    pub async fn browser_versions(&self) -> &BrowserVersions {
        self.versions
            .get_or_init(|| async {
                match self.store.tabular().await {
                    Ok(dataset) => {
                        let versions = derive_browser_versions(&dataset, &self.fallback_versions);
                        info!(
                            "Browser versions: chrome {}, firefox {}, safari {}",
                            versions.chrome, versions.firefox, versions.safari
                        );
                        versions
                    }
                    Err(e) => {
                        warn!("Using fallback browser versions: {}", e);
                        self.fallback_versions.clone()
                    }
                }
            })
            .await
    }

    pub fn cached(&self, key: &str) -> Option<BrowserSupport> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Store a result unless another resolution got there first
    fn insert(&self, key: &str, support: BrowserSupport) -> BrowserSupport {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_string())
            .or_insert(support)
            .clone()
    }

    async fn from_hierarchical(
        &self,
        path: &str,
        versions: &BrowserVersions,
    ) -> Option<BrowserSupport> {
        let dataset = self
            .store
            .hierarchical()
            .await
            .inspect_err(|e| warn!("Hierarchical dataset unavailable for {}: {}", path, e))
            .ok()?;

        match resolve_hierarchical(&dataset, path, versions) {
            Ok(support) if support.is_conclusive() => Some(support),
            Ok(_) => {
                debug!("Hierarchical dataset inconclusive for {}", path);
                None
            }
            Err(e) => {
                error!("Invalid hierarchical data for {}: {}", path, e);
                None
            }
        }
    }

    async fn from_tabular(&self, key: &str, versions: &BrowserVersions) -> Option<BrowserSupport> {
        if is_universally_supported(key) {
            debug!("{} is universally supported", key);
            return Some(BrowserSupport::uniform(SupportLevel::Supported));
        }

        let dataset = self
            .store
            .tabular()
            .await
            .inspect_err(|e| warn!("Tabular dataset unavailable for {}: {}", key, e))
            .ok()?;

        let support = resolve_tabular(&dataset, key, versions);
        if support.is_conclusive() {
            Some(support)
        } else {
            debug!("Tabular dataset inconclusive for {}", key);
            None
        }
    }
}
