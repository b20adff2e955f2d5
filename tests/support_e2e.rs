//! Resolution and scoring end to end over fixture datasets

mod helper;

use std::sync::Arc;

use serde_json::{Value, json};

use compat_score::catalog::{Feature, FeatureCatalog};
use compat_score::compat::status::SupportLevel;
use compat_score::compat::types::{BrowserKey, BrowserScores, BrowserSupport, FeatureStatus};
use compat_score::support::{calculate_all_scores, calculate_browser_score};

use helper::{FixtureLoader, create_test_aggregator, current_versions, tabular_agents};

fn tabular_document() -> Value {
    json!({
        "agents": tabular_agents(),
        "data": {
            "dialog": {
                "stats": {
                    "and_chr": { "131": "y" },
                    "and_ff": { "132": "y" },
                    "ios_saf": { "17.4": "y", "17.5": "y" }
                }
            },
            "css-has": {
                "stats": {
                    "and_chr": { "131": "y" },
                    "and_ff": { "132": "n" },
                    "ios_saf": { "15.4-15.8": "y", "17.5": "y" }
                }
            },
            "view-transitions": {
                "stats": {
                    "and_chr": { "131": "y" },
                    "and_ff": { "132": "n d #1" },
                    "ios_saf": { "17.5": "n" }
                }
            }
        }
    })
}

fn hierarchical_document() -> Value {
    json!({
        "api": {
            "ApplePaySession": {
                "__compat": {
                    "support": {
                        "chrome_android": { "version_added": false },
                        "firefox_android": { "version_added": false },
                        "safari_ios": { "version_added": "10" }
                    },
                    "status": { "experimental": false, "standard_track": false, "deprecated": false }
                }
            },
            "Navigation": {
                "__compat": {
                    "support": {
                        "chrome_android": { "version_added": "102" },
                        "firefox_android": { "version_added": false },
                        "safari_ios": { "version_added": false }
                    },
                    "status": { "experimental": true, "standard_track": true, "deprecated": false }
                }
            }
        },
        "html": {
            "elements": {
                "dialog": {
                    "__compat": {
                        "support": {
                            "chrome_android": { "version_added": null },
                            "firefox_android": [],
                            "safari_ios": { "version_added": null }
                        }
                    }
                }
            }
        }
    })
}

fn catalog() -> FeatureCatalog {
    FeatureCatalog::from_json(
        &json!({
            "groups": [{
                "id": "platform",
                "name": "Platform",
                "categories": [{
                    "id": "ui",
                    "name": "User interface",
                    "features": [
                        {
                            "id": "dialog",
                            "name": "Dialog element",
                            "description": "Native modal dialogs",
                            "weight": 2.0,
                            "tabularId": "dialog",
                            "hierarchicalPath": "html.elements.dialog"
                        },
                        {
                            "id": "css-has",
                            "name": ":has() selector",
                            "description": "Parent selector",
                            "weight": 3.0,
                            "tabularId": "css-has"
                        },
                        {
                            "id": "navigation-api",
                            "name": "Navigation API",
                            "description": "Single page app navigation",
                            "hierarchicalPath": "api.Navigation"
                        },
                        {
                            "id": "view-transitions",
                            "name": "View transitions",
                            "description": "Animated page transitions",
                            "tabularId": "view-transitions",
                            "status": { "experimental": true }
                        },
                        {
                            "id": "apple-pay",
                            "name": "Apple Pay",
                            "description": "Wallet checkout"
                        },
                        {
                            "id": "mystery",
                            "name": "Unlisted feature",
                            "description": "Nobody knows"
                        }
                    ]
                }]
            }]
        })
        .to_string(),
    )
    .unwrap()
}

fn full_loader() -> Arc<FixtureLoader> {
    Arc::new(
        FixtureLoader::new()
            .with_tabular(tabular_document())
            .with_hierarchical(hierarchical_document()),
    )
}

#[tokio::test]
async fn hierarchical_threshold_resolves_and_is_stable_across_cache_hits() {
    let loader = full_loader();
    let aggregator = create_test_aggregator(loader.clone());
    let feature = Feature::new("apple-pay-js", "Apple Pay JS", "Wallet checkout")
        .with_hierarchical_path("api.ApplePaySession");

    let resolved = aggregator.load_support(&feature).await;

    assert_eq!(resolved.chrome, SupportLevel::NotSupported);
    assert_eq!(resolved.firefox, SupportLevel::NotSupported);
    assert_eq!(resolved.safari, SupportLevel::Supported);
    assert_eq!(resolved.version(BrowserKey::Safari), Some("10"));

    assert_eq!(aggregator.get_support(&feature), resolved);
    assert_eq!(aggregator.load_support(&feature).await, resolved);
    assert_eq!(loader.calls(), (1, 1));
}

#[tokio::test]
async fn versions_are_derived_from_tabular_agents() {
    let aggregator = create_test_aggregator(full_loader());

    assert_eq!(aggregator.browser_versions().await, &current_versions());
}

#[tokio::test]
async fn catalog_resolves_through_every_fallback_tier() {
    let loader = full_loader();
    let aggregator = create_test_aggregator(loader.clone());
    let catalog = catalog();

    let results = aggregator.load_multiple_support(catalog.features()).await;

    // dialog: hierarchical is all unknown, tabular answers
    assert_eq!(
        results[0],
        BrowserSupport {
            chrome_version: Some("131".to_string()),
            firefox_version: Some("132".to_string()),
            safari_version: Some("17.5".to_string()),
            ..BrowserSupport::uniform(SupportLevel::Supported)
        }
    );
    // navigation-api: hierarchical answers, with its status
    assert_eq!(results[2].chrome, SupportLevel::Supported);
    assert!(results[2].status.is_some_and(|s| s.experimental));
    // apple-pay: no identifiers, manual override
    assert_eq!(results[4].safari, SupportLevel::Supported);
    // mystery: nothing anywhere
    assert_eq!(results[5], BrowserSupport::unknown());

    assert_eq!(aggregator.cached_len(), 6);
    assert_eq!(loader.calls(), (1, 1));
}

#[tokio::test]
async fn catalog_scores_split_stable_and_full() {
    let aggregator = create_test_aggregator(full_loader());
    let catalog = catalog();
    aggregator.load_multiple_support(catalog.features()).await;

    let scores = calculate_all_scores(&catalog, |f| aggregator.get_support(f));

    // Stable: dialog (w2), css-has (w3), apple-pay (w1); mystery is unknown.
    // Full adds navigation-api and view-transitions (w1 each).
    assert_eq!(
        scores[&BrowserKey::Chrome],
        BrowserScores {
            weighted: 83,
            unweighted: 67,
            weighted_full: 88,
            unweighted_full: 80,
        }
    );
    assert_eq!(
        scores[&BrowserKey::Firefox],
        BrowserScores {
            weighted: 33,
            unweighted: 33,
            weighted_full: 25,
            unweighted_full: 20,
        }
    );
    assert_eq!(
        scores[&BrowserKey::Safari],
        BrowserScores {
            weighted: 100,
            unweighted: 100,
            weighted_full: 75,
            unweighted_full: 60,
        }
    );
}

#[tokio::test]
async fn unavailable_sources_score_zero_without_failing() {
    let loader = Arc::new(FixtureLoader::new());
    let aggregator = create_test_aggregator(loader.clone());
    let catalog = FeatureCatalog::from_features(vec![
        Feature::new("dialog", "Dialog", "Modal").with_tabular_id("dialog"),
        Feature::new("share", "Share", "Share sheet").with_hierarchical_path("api.Share"),
    ]);

    let results = aggregator.load_multiple_support(catalog.features()).await;
    let score = calculate_browser_score(BrowserKey::Chrome, &catalog, |f| aggregator.get_support(f));

    assert!(results.iter().all(|r| *r == BrowserSupport::unknown()));
    assert_eq!(score, BrowserScores::default());
}

#[tokio::test]
async fn experimental_catalog_status_keeps_feature_out_of_stable_score() {
    let aggregator = create_test_aggregator(full_loader());
    let experimental = FeatureStatus {
        experimental: true,
        ..FeatureStatus::default()
    };
    let catalog = FeatureCatalog::from_features(vec![
        Feature::new("dialog", "Dialog", "Modal").with_tabular_id("dialog"),
        Feature::new("vt", "View transitions", "Transitions")
            .with_tabular_id("view-transitions")
            .with_status(experimental),
    ]);
    aggregator.load_multiple_support(catalog.features()).await;

    let score = calculate_browser_score(BrowserKey::Safari, &catalog, |f| aggregator.get_support(f));

    assert_eq!(
        score,
        BrowserScores {
            weighted: 100,
            unweighted: 100,
            weighted_full: 50,
            unweighted_full: 50,
        }
    );
}
