//! Tabular dataset: document schema, version column matching and resolution
//!
//! The tabular dataset maps every feature key to per-agent tables of
//! `version (or version range) -> status code`. Resolving a feature means
//! picking the column that covers the browser's current version and parsing
//! its status code.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::compat::error::DatasetError;
use crate::compat::status::{SupportLevel, parse_status};
use crate::compat::types::{BrowserKey, BrowserSupport, BrowserVersions};
use crate::compat::version::{compare_versions, in_range};

/// Feature keys absent from the dataset that every target browser supports
pub const UNIVERSALLY_SUPPORTED: &[&str] = &["html5", "css2", "es3", "dom-core"];

/// Column key used for preview builds
const TECHNOLOGY_PREVIEW_KEY: &str = "TP";

/// Range column keys such as `16.4-16.7`
static RANGE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)-(\d+(?:\.\d+)*)$").expect("range key pattern is valid")
});

#[derive(Debug, Clone, Deserialize)]
pub struct TabularDataset {
    pub agents: HashMap<String, AgentInfo>,
    pub data: HashMap<String, TabularFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentInfo {
    #[serde(default)]
    pub browser: String,
    #[serde(default)]
    pub current_version: Option<String>,
    #[serde(default)]
    pub version_list: Vec<VersionListEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionListEntry {
    pub version: String,
    /// Release timestamp in seconds since UNIX epoch; null for unreleased
    #[serde(default)]
    pub release_date: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TabularFeature {
    #[serde(default)]
    pub stats: HashMap<String, HashMap<String, String>>,
}

impl TabularDataset {
    /// Parse and validate a raw JSON document
    pub fn from_json(text: &str) -> Result<Self, DatasetError> {
        let dataset: TabularDataset = serde_json::from_str(text)
            .map_err(|e| DatasetError::Validation(format!("tabular dataset: {}", e)))?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check that every target browser agent is described
    pub fn validate(&self) -> Result<(), DatasetError> {
        let missing: Vec<&str> = BrowserKey::ALL
            .iter()
            .map(|browser| browser.tabular_agent())
            .filter(|agent| !self.agents.contains_key(*agent))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DatasetError::Validation(format!(
                "tabular dataset is missing agents: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Resolve a feature's support from the tabular dataset
///
/// A feature key absent from the dataset yields all-unknown.
pub fn resolve_tabular(
    dataset: &TabularDataset,
    feature_key: &str,
    versions: &BrowserVersions,
) -> BrowserSupport {
    if is_universally_supported(feature_key) {
        return BrowserSupport::uniform(SupportLevel::Supported);
    }

    let Some(feature) = dataset.data.get(feature_key) else {
        debug!("Feature {} not found in tabular dataset", feature_key);
        return BrowserSupport::unknown();
    };

    let mut support = BrowserSupport::unknown();
    for browser in BrowserKey::ALL {
        let Some(stats) = feature.stats.get(browser.tabular_agent()) else {
            continue;
        };
        if let Some(column) = find_version_column(stats, versions.get(browser)) {
            support.set_level(browser, parse_status(stats.get(column).map(String::as_str)));
            support.set_version(browser, Some(column.to_string()));
        }
    }

    support
}

pub fn is_universally_supported(feature_key: &str) -> bool {
    UNIVERSALLY_SUPPORTED.contains(&feature_key)
}

/// Find the column covering `target`
///
/// Tried in order: exact key, major version, first containing range,
/// technology preview.
pub fn find_version_column<'a>(
    stats: &'a HashMap<String, String>,
    target: &str,
) -> Option<&'a str> {
    if let Some((key, _)) = stats.get_key_value(target) {
        return Some(key.as_str());
    }

    if let Some((major, _)) = target.split_once('.')
        && let Some((key, _)) = stats.get_key_value(major)
    {
        return Some(key.as_str());
    }

    let mut ranges: Vec<&String> = stats
        .keys()
        .filter(|key| RANGE_KEY.is_match(key))
        .collect();
    // Map iteration order is arbitrary; keep "first range" deterministic
    ranges.sort_by(|a, b| compare_versions(a, b));
    if let Some(key) = ranges.into_iter().find(|key| range_contains(key, target)) {
        return Some(key.as_str());
    }

    stats
        .get_key_value(TECHNOLOGY_PREVIEW_KEY)
        .map(|(key, _)| key.as_str())
}

fn range_contains(range_key: &str, target: &str) -> bool {
    RANGE_KEY
        .captures(range_key)
        .and_then(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .is_some_and(|(low, high)| in_range(target, low, high))
}

/// Derive the current version of each browser from agent metadata
///
/// Browsers whose version cannot be derived use the matching `fallback` value.
pub fn derive_browser_versions(
    dataset: &TabularDataset,
    fallback: &BrowserVersions,
) -> BrowserVersions {
    let derive = |browser: BrowserKey| -> String {
        let agent = dataset.agents.get(browser.tabular_agent());
        let current = agent.and_then(|a| a.current_version.clone());
        let derived = match browser {
            BrowserKey::Safari => current.or_else(|| agent.and_then(latest_released_version)),
            BrowserKey::Chrome | BrowserKey::Firefox => current,
        };
        derived.unwrap_or_else(|| {
            debug!(
                "No current version for {}, using fallback {}",
                browser,
                fallback.get(browser)
            );
            fallback.get(browser).to_string()
        })
    };

    BrowserVersions {
        chrome: derive(BrowserKey::Chrome),
        firefox: derive(BrowserKey::Firefox),
        safari: derive(BrowserKey::Safari),
    }
}

/// Highest released, non-range version in the agent's version list
fn latest_released_version(agent: &AgentInfo) -> Option<String> {
    let now = Utc::now().timestamp();
    agent
        .version_list
        .iter()
        .filter(|entry| !entry.version.contains('-'))
        .filter(|entry| entry.release_date.is_some_and(|date| date <= now))
        .max_by(|a, b| compare_versions(&a.version, &b.version))
        .map(|entry| entry.version.clone())
}
