//! Common types shared by the resolvers, the aggregator and the scorer

use serde::{Deserialize, Serialize};

use crate::compat::status::SupportLevel;

/// Mobile browser targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKey {
    /// Chrome for Android
    Chrome,
    /// Firefox for Android
    Firefox,
    /// Safari on iOS
    Safari,
}

impl BrowserKey {
    pub const ALL: [BrowserKey; 3] = [BrowserKey::Chrome, BrowserKey::Firefox, BrowserKey::Safari];

    /// Returns the string representation of the browser key
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKey::Chrome => "chrome",
            BrowserKey::Firefox => "firefox",
            BrowserKey::Safari => "safari",
        }
    }

    /// Agent key used by the tabular dataset
    pub fn tabular_agent(&self) -> &'static str {
        match self {
            BrowserKey::Chrome => "and_chr",
            BrowserKey::Firefox => "and_ff",
            BrowserKey::Safari => "ios_saf",
        }
    }

    /// Browser key used by the hierarchical dataset
    pub fn hierarchical_key(&self) -> &'static str {
        match self {
            BrowserKey::Chrome => "chrome_android",
            BrowserKey::Firefox => "firefox_android",
            BrowserKey::Safari => "safari_ios",
        }
    }
}

impl std::str::FromStr for BrowserKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chrome" => Ok(BrowserKey::Chrome),
            "firefox" => Ok(BrowserKey::Firefox),
            "safari" => Ok(BrowserKey::Safari),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for BrowserKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standardization state of a feature, independent of browser support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStatus {
    #[serde(default)]
    pub experimental: bool,
    #[serde(default = "default_true")]
    pub standard_track: bool,
    #[serde(default)]
    pub deprecated: bool,
}

fn default_true() -> bool {
    true
}

impl FeatureStatus {
    /// Whether a feature with this status counts towards the stable score
    pub fn is_stable(&self) -> bool {
        !self.experimental && !self.deprecated && self.standard_track
    }
}

impl Default for FeatureStatus {
    fn default() -> Self {
        Self {
            experimental: false,
            standard_track: true,
            deprecated: false,
        }
    }
}

/// Current version of each target browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserVersions {
    pub chrome: String,
    pub firefox: String,
    pub safari: String,
}

impl BrowserVersions {
    pub fn get(&self, browser: BrowserKey) -> &str {
        match browser {
            BrowserKey::Chrome => &self.chrome,
            BrowserKey::Firefox => &self.firefox,
            BrowserKey::Safari => &self.safari,
        }
    }
}

/// Resolved support of one feature across all target browsers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSupport {
    #[serde(default)]
    pub chrome: SupportLevel,
    #[serde(default)]
    pub firefox: SupportLevel,
    #[serde(default)]
    pub safari: SupportLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureStatus>,
    /// Version evidence behind each level (matched column or `version_added`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firefox_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safari_version: Option<String>,
}

impl BrowserSupport {
    /// All browsers unknown, no status
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Same level for every browser
    pub fn uniform(level: SupportLevel) -> Self {
        Self {
            chrome: level,
            firefox: level,
            safari: level,
            ..Self::default()
        }
    }

    pub fn level(&self, browser: BrowserKey) -> SupportLevel {
        match browser {
            BrowserKey::Chrome => self.chrome,
            BrowserKey::Firefox => self.firefox,
            BrowserKey::Safari => self.safari,
        }
    }

    pub fn set_level(&mut self, browser: BrowserKey, level: SupportLevel) {
        match browser {
            BrowserKey::Chrome => self.chrome = level,
            BrowserKey::Firefox => self.firefox = level,
            BrowserKey::Safari => self.safari = level,
        }
    }

    pub fn version(&self, browser: BrowserKey) -> Option<&str> {
        match browser {
            BrowserKey::Chrome => self.chrome_version.as_deref(),
            BrowserKey::Firefox => self.firefox_version.as_deref(),
            BrowserKey::Safari => self.safari_version.as_deref(),
        }
    }

    pub fn set_version(&mut self, browser: BrowserKey, version: Option<String>) {
        match browser {
            BrowserKey::Chrome => self.chrome_version = version,
            BrowserKey::Firefox => self.firefox_version = version,
            BrowserKey::Safari => self.safari_version = version,
        }
    }

    /// True when at least one browser has a known level
    pub fn is_conclusive(&self) -> bool {
        BrowserKey::ALL
            .iter()
            .any(|browser| !self.level(*browser).is_unknown())
    }
}

/// Aggregate scores of one browser, each in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserScores {
    /// Stable features, weighted by importance
    pub weighted: u8,
    /// Stable features, every feature counts once
    pub unweighted: u8,
    /// All resolved features, weighted by importance
    pub weighted_full: u8,
    /// All resolved features, every feature counts once
    pub unweighted_full: u8,
}
