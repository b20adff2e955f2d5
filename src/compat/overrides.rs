//! Manual support records for features absent from both public datasets
//!
//! Vendor-specific APIs (wallet integrations, installable-app hooks) are not
//! tracked by either dataset, so their support is recorded by hand.

use std::collections::HashMap;

use crate::compat::status::SupportLevel;
use crate::compat::types::BrowserSupport;

#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<String, BrowserSupport>,
}

impl OverrideTable {
    pub fn new(entries: HashMap<String, BrowserSupport>) -> Self {
        Self { entries }
    }

    /// Built-in table shipped with the crate
    pub fn builtin() -> Self {
        use SupportLevel::{NotSupported, Partial, Supported};

        let entry = |chrome, firefox, safari| BrowserSupport {
            chrome,
            firefox,
            safari,
            ..BrowserSupport::default()
        };

        Self::new(HashMap::from([
            ("apple-pay".to_string(), entry(NotSupported, NotSupported, Supported)),
            ("google-pay".to_string(), entry(Supported, NotSupported, NotSupported)),
            ("samsung-pay".to_string(), entry(Partial, NotSupported, NotSupported)),
            ("web-share-target".to_string(), entry(Supported, NotSupported, NotSupported)),
        ]))
    }

    pub fn get(&self, feature_id: &str) -> Option<&BrowserSupport> {
        self.entries.get(feature_id)
    }

    /// Override for `feature_id`, or all-unknown when there is none
    pub fn resolve(&self, feature_id: &str) -> BrowserSupport {
        self.get(feature_id)
            .cloned()
            .unwrap_or_else(BrowserSupport::unknown)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
