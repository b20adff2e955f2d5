//! Hierarchical dataset: per-API compatibility statements keyed by dotted path
//!
//! Leaf nodes carry a `__compat` object whose `support` map holds one
//! statement per browser. A statement's `version_added` may be a boolean,
//! null, or a version threshold optionally prefixed with a comparison
//! operator (`≤37`, `>=15`).

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::compat::error::DatasetError;
use crate::compat::status::SupportLevel;
use crate::compat::types::{BrowserKey, BrowserSupport, BrowserVersions, FeatureStatus};
use crate::compat::version::compare_versions;

const COMPAT_KEY: &str = "__compat";

/// Validated hierarchical dataset document
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchicalDataset {
    root: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompatStatement {
    #[serde(default)]
    pub mdn_url: Option<String>,
    #[serde(default)]
    pub support: HashMap<String, SupportStatement>,
    #[serde(default)]
    pub status: Option<RawStatus>,
}

/// A browser's support: one record, or successive implementation attempts
/// (most relevant first)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SupportStatement {
    Multiple(Vec<SupportEntry>),
    Single(SupportEntry),
}

impl SupportStatement {
    pub fn primary(&self) -> Option<&SupportEntry> {
        match self {
            SupportStatement::Multiple(entries) => entries.first(),
            SupportStatement::Single(entry) => Some(entry),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupportEntry {
    #[serde(default)]
    pub version_added: Option<VersionValue>,
    #[serde(default)]
    pub partial_implementation: bool,
    #[serde(default)]
    pub flags: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VersionValue {
    Flag(bool),
    Version(String),
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawStatus {
    #[serde(default)]
    pub experimental: Option<bool>,
    #[serde(default)]
    pub standard_track: Option<bool>,
    #[serde(default)]
    pub deprecated: Option<bool>,
}

impl From<RawStatus> for FeatureStatus {
    fn from(raw: RawStatus) -> Self {
        Self {
            experimental: raw.experimental == Some(true),
            standard_track: raw.standard_track != Some(false),
            deprecated: raw.deprecated == Some(true),
        }
    }
}

/// How a `version_added` string relates to the current browser version
#[derive(Debug, PartialEq)]
enum Requirement<'a> {
    /// `≤X`: support landed at some version before X
    AlreadyMet,
    /// Only available in preview builds
    Preview,
    AtLeast(&'a str),
}

impl<'a> Requirement<'a> {
    fn parse(raw: &'a str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("preview") {
            return Requirement::Preview;
        }
        if raw.starts_with('≤') || raw.starts_with("<=") {
            return Requirement::AlreadyMet;
        }
        Requirement::AtLeast(strip_operator(raw))
    }
}

fn strip_operator(raw: &str) -> &str {
    ["≤", "≥", "<=", ">=", ">", "<"]
        .iter()
        .find_map(|op| raw.strip_prefix(op))
        .unwrap_or(raw)
        .trim()
}

impl HierarchicalDataset {
    /// Parse and validate a raw JSON document
    pub fn from_json(text: &str) -> Result<Self, DatasetError> {
        let root: Value = serde_json::from_str(text)
            .map_err(|e| DatasetError::Validation(format!("hierarchical dataset: {}", e)))?;
        Self::from_value(root)
    }

    pub fn from_value(root: Value) -> Result<Self, DatasetError> {
        if !root.is_object() {
            return Err(DatasetError::Validation(
                "hierarchical dataset root is not an object".to_string(),
            ));
        }
        Ok(Self { root })
    }

    /// Navigate to the node at a dotted path
    pub fn node(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }
        path.split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))
    }

    /// Compatibility statement at `path`
    ///
    /// Returns `Ok(None)` when the path does not exist, and a validation
    /// error when the node exists but its `__compat` object is malformed.
    pub fn compat(&self, path: &str) -> Result<Option<CompatStatement>, DatasetError> {
        let Some(compat) = self.node(path).and_then(|node| node.get(COMPAT_KEY)) else {
            return Ok(None);
        };

        CompatStatement::deserialize(compat)
            .map(Some)
            .map_err(|e| DatasetError::Validation(format!("{} at {}: {}", COMPAT_KEY, path, e)))
    }
}

/// Resolve a feature's support from the hierarchical dataset
///
/// A missing path yields all-unknown; only a malformed statement is an error.
pub fn resolve_hierarchical(
    dataset: &HierarchicalDataset,
    path: &str,
    versions: &BrowserVersions,
) -> Result<BrowserSupport, DatasetError> {
    let Some(compat) = dataset.compat(path)? else {
        debug!("Path {} not found in hierarchical dataset", path);
        return Ok(BrowserSupport::unknown());
    };

    let mut support = BrowserSupport {
        status: compat.status.map(FeatureStatus::from),
        ..BrowserSupport::unknown()
    };

    for browser in BrowserKey::ALL {
        let Some(entry) = compat
            .support
            .get(browser.hierarchical_key())
            .and_then(SupportStatement::primary)
        else {
            continue;
        };

        support.set_level(browser, resolve_entry(entry, versions.get(browser)));
        if let Some(VersionValue::Version(added)) = &entry.version_added {
            support.set_version(browser, Some(added.clone()));
        }
    }

    Ok(support)
}

/// Interpret one support record against the browser's current version
pub fn resolve_entry(entry: &SupportEntry, current: &str) -> SupportLevel {
    // Features behind a flag are not available to ordinary users
    if !entry.flags.is_empty() {
        return SupportLevel::NotSupported;
    }

    let supported = match &entry.version_added {
        None => return SupportLevel::Unknown,
        Some(VersionValue::Flag(false)) => return SupportLevel::NotSupported,
        Some(VersionValue::Flag(true)) => true,
        Some(VersionValue::Version(added)) => match Requirement::parse(added) {
            Requirement::AlreadyMet => true,
            Requirement::Preview => false,
            Requirement::AtLeast(required) => compare_versions(current, required).is_ge(),
        },
    };

    if !supported {
        SupportLevel::NotSupported
    } else if entry.partial_implementation {
        SupportLevel::Partial
    } else {
        SupportLevel::Supported
    }
}
