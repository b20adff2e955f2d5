//! Support taxonomy and tabular status code parsing

use serde::{Deserialize, Serialize};

/// Outcome of resolving a feature's support in one browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupportLevel {
    Supported,
    Partial,
    NotSupported,
    #[default]
    Unknown,
}

impl SupportLevel {
    /// Score contribution of this level, or None when it must be excluded
    pub fn weight(&self) -> Option<f64> {
        match self {
            SupportLevel::Supported => Some(1.0),
            SupportLevel::Partial => Some(0.5),
            SupportLevel::NotSupported => Some(0.0),
            SupportLevel::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SupportLevel::Unknown)
    }

    /// Returns the string representation used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportLevel::Supported => "supported",
            SupportLevel::Partial => "partial",
            SupportLevel::NotSupported => "not-supported",
            SupportLevel::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SupportLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a tabular dataset status code (e.g. `"y"`, `"a x #2"`, `"n d"`)
///
/// Only the first character decides the level; trailing modifiers and
/// footnote markers are ignored. Prefixed (`x`) and polyfilled (`p`) support
/// count as partial.
pub fn parse_status(code: Option<&str>) -> SupportLevel {
    let Some(first) = code
        .map(str::trim)
        .and_then(|c| c.chars().next())
        .map(|c| c.to_ascii_lowercase())
    else {
        return SupportLevel::Unknown;
    };

    match first {
        'y' => SupportLevel::Supported,
        'a' | 'p' | 'x' => SupportLevel::Partial,
        'n' | 'u' => SupportLevel::NotSupported,
        _ => SupportLevel::Unknown,
    }
}
