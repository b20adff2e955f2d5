//! Weighted browser scores over the feature catalog
//!
//! Every resolved feature feeds the "full" tally; only stable features
//! (not experimental, not deprecated, on the standards track) feed the
//! primary tally. Unknown support is left out of both.

use indexmap::IndexMap;

use crate::catalog::{Feature, FeatureCatalog};
use crate::compat::types::{BrowserKey, BrowserScores, BrowserSupport};

#[derive(Debug, Default)]
struct Tally {
    weighted_points: f64,
    weighted_total: f64,
    unweighted_points: f64,
    count: usize,
}

impl Tally {
    fn add(&mut self, level_weight: f64, feature_weight: f64) {
        self.weighted_points += level_weight * feature_weight;
        self.weighted_total += feature_weight;
        self.unweighted_points += level_weight;
        self.count += 1;
    }

    fn weighted(&self) -> u8 {
        if self.count == 0 || self.weighted_total == 0.0 {
            return 0;
        }
        percentage(self.weighted_points / self.weighted_total)
    }

    fn unweighted(&self) -> u8 {
        if self.count == 0 {
            return 0;
        }
        percentage(self.unweighted_points / self.count as f64)
    }
}

fn percentage(ratio: f64) -> u8 {
    // Every contribution is within [0, 1] of its weight, so ratio is too
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Whether a feature counts towards the stable score
///
/// The catalog's status wins over the one found in the dataset; a feature
/// with neither is stable.
fn is_stable(feature: &Feature, support: &BrowserSupport) -> bool {
    feature
        .status
        .or(support.status)
        .is_none_or(|status| status.is_stable())
}

/// Compute the four scores of one browser
///
/// `lookup` must return already-resolved support; the calculator never
/// triggers resolution.
pub fn calculate_browser_score<F>(
    browser: BrowserKey,
    catalog: &FeatureCatalog,
    lookup: F,
) -> BrowserScores
where
    F: Fn(&Feature) -> BrowserSupport,
{
    let mut stable = Tally::default();
    let mut full = Tally::default();

    for feature in catalog.features() {
        let support = lookup(feature);
        let Some(level_weight) = support.level(browser).weight() else {
            continue;
        };

        let feature_weight = feature.effective_weight();
        full.add(level_weight, feature_weight);
        if is_stable(feature, &support) {
            stable.add(level_weight, feature_weight);
        }
    }

    BrowserScores {
        weighted: stable.weighted(),
        unweighted: stable.unweighted(),
        weighted_full: full.weighted(),
        unweighted_full: full.unweighted(),
    }
}

/// Scores of every target browser, in [`BrowserKey::ALL`] order
pub fn calculate_all_scores<F>(
    catalog: &FeatureCatalog,
    lookup: F,
) -> IndexMap<BrowserKey, BrowserScores>
where
    F: Fn(&Feature) -> BrowserSupport,
{
    BrowserKey::ALL
        .into_iter()
        .map(|browser| (browser, calculate_browser_score(browser, catalog, &lookup)))
        .collect()
}
