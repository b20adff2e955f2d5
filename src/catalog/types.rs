//! Feature catalog types

use serde::{Deserialize, Serialize};

use crate::compat::types::FeatureStatus;

/// Default importance of a feature without an explicit weight
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Allowed range of explicit feature weights
pub const MIN_WEIGHT: f64 = 0.5;
pub const MAX_WEIGHT: f64 = 3.0;

/// A web-platform feature tracked by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Importance in `0.5..=3.0`; core platform features weigh more
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Key into the tabular dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabular_id: Option<String>,
    /// Dotted path into the hierarchical dataset (e.g. `api.PaymentRequest`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchical_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureStatus>,
}

impl Feature {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            weight: None,
            tabular_id: None,
            hierarchical_path: None,
            status: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_tabular_id(mut self, tabular_id: &str) -> Self {
        self.tabular_id = Some(tabular_id.to_string());
        self
    }

    pub fn with_hierarchical_path(mut self, path: &str) -> Self {
        self.hierarchical_path = Some(path.to_string());
        self
    }

    pub fn with_status(mut self, status: FeatureStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<FeatureCategory>,
}

/// Read-only group → category → feature document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCatalog {
    #[serde(default)]
    pub groups: Vec<FeatureGroup>,
}

impl FeatureCatalog {
    /// Build a catalog holding `features` in a single group and category
    pub fn from_features(features: Vec<Feature>) -> Self {
        Self {
            groups: vec![FeatureGroup {
                id: "all".to_string(),
                name: "All features".to_string(),
                categories: vec![FeatureCategory {
                    id: "all".to_string(),
                    name: "All features".to_string(),
                    features,
                }],
            }],
        }
    }

    /// Every feature in catalog order, ignoring grouping
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.groups
            .iter()
            .flat_map(|group| group.categories.iter())
            .flat_map(|category| category.features.iter())
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features().find(|feature| feature.id == id)
    }

    pub fn len(&self) -> usize {
        self.features().count()
    }

    pub fn is_empty(&self) -> bool {
        self.features().next().is_none()
    }
}
