//! Aggregator wired from configuration against a local HTTP server

use mockito::Server;
use serde_json::json;

use compat_score::catalog::Feature;
use compat_score::compat::status::SupportLevel;
use compat_score::compat::types::{BrowserSupport, BrowserVersions};
use compat_score::config::{Config, DatasetsConfig};
use compat_score::support::SupportAggregator;

fn config_for(server: &Server) -> Config {
    Config {
        datasets: DatasetsConfig {
            tabular_url: format!("{}/caniuse.json", server.url()),
            hierarchical_url: format!("{}/bcd.json", server.url()),
            timeout: 5_000,
        },
        ..Config::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn resolves_features_from_served_datasets() {
    let mut server = Server::new_async().await;

    let tabular = server
        .mock("GET", "/caniuse.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "agents": {
                    "and_chr": { "browser": "Chrome for Android", "current_version": "131" },
                    "and_ff": { "browser": "Firefox for Android", "current_version": "132" },
                    "ios_saf": { "browser": "Safari on iOS", "current_version": "17.5" }
                },
                "data": {
                    "webgpu": {
                        "stats": {
                            "and_chr": { "131": "y" },
                            "and_ff": { "132": "n d" },
                            "ios_saf": { "17.5": "n d" }
                        }
                    }
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let hierarchical = server
        .mock("GET", "/bcd.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "api": {
                    "GPU": {
                        "__compat": {
                            "support": {
                                "chrome_android": { "version_added": "121" },
                                "firefox_android": { "version_added": "141", "flags": [{ "type": "preference" }] },
                                "safari_ios": { "version_added": "26" }
                            },
                            "status": { "experimental": true, "standard_track": true, "deprecated": false }
                        }
                    }
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let aggregator = SupportAggregator::from_config(&config_for(&server)).unwrap();
    let gpu = Feature::new("webgpu", "WebGPU", "GPU compute")
        .with_hierarchical_path("api.GPU");
    let webgpu = Feature::new("webgpu-tabular", "WebGPU", "GPU compute").with_tabular_id("webgpu");

    let results = aggregator.load_multiple_support([&gpu, &webgpu]).await;

    tabular.assert_async().await;
    hierarchical.assert_async().await;

    assert_eq!(results[0].chrome, SupportLevel::Supported);
    assert_eq!(results[0].firefox, SupportLevel::NotSupported);
    assert_eq!(results[0].safari, SupportLevel::NotSupported);
    assert!(results[0].status.is_some_and(|s| s.experimental));
    assert_eq!(results[1].chrome, SupportLevel::Supported);
    assert_eq!(results[1].safari, SupportLevel::NotSupported);
}

#[tokio::test(flavor = "multi_thread")]
async fn server_errors_degrade_to_unknown() {
    let mut server = Server::new_async().await;

    let tabular = server
        .mock("GET", "/caniuse.json")
        .with_status(503)
        .expect_at_least(1)
        .create_async()
        .await;
    let hierarchical = server
        .mock("GET", "/bcd.json")
        .with_status(200)
        .with_body("not json")
        .expect(1)
        .create_async()
        .await;

    let aggregator = SupportAggregator::from_config(&config_for(&server)).unwrap();
    let feature = Feature::new("dialog", "Dialog", "Modal")
        .with_tabular_id("dialog")
        .with_hierarchical_path("html.elements.dialog");

    let support = aggregator.load_support(&feature).await;

    tabular.assert_async().await;
    hierarchical.assert_async().await;
    assert_eq!(support, BrowserSupport::unknown());
    let fallback: BrowserVersions = Config::default().fallback_versions.into();
    assert_eq!(aggregator.browser_versions().await, &fallback);
}
