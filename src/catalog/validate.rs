//! Catalog loading and validation
//!
//! A malformed catalog is rejected before any resolution happens.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::catalog::types::{Feature, FeatureCatalog, MAX_WEIGHT, MIN_WEIGHT};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Feature {feature:?} is missing required field {field}")]
    MissingField {
        feature: String,
        field: &'static str,
    },

    #[error("Duplicate feature id: {0}")]
    DuplicateId(String),

    #[error("Feature {feature} has weight {weight} outside 0.5..=3.0")]
    WeightOutOfRange { feature: String, weight: f64 },
}

impl FeatureCatalog {
    /// Parse and validate a catalog document
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let catalog: FeatureCatalog = serde_json::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse and validate a catalog file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&text)?;
        info!("Loaded {} features from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Check required fields, id uniqueness and weight bounds
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for feature in self.features() {
            validate_feature(feature)?;
            if !seen.insert(feature.id.as_str()) {
                return Err(CatalogError::DuplicateId(feature.id.clone()));
            }
        }
        Ok(())
    }
}

fn validate_feature(feature: &Feature) -> Result<(), CatalogError> {
    let required = [
        ("id", &feature.id),
        ("name", &feature.name),
        ("description", &feature.description),
    ];
    if let Some(&(field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(CatalogError::MissingField {
            feature: if feature.id.is_empty() {
                feature.name.clone()
            } else {
                feature.id.clone()
            },
            field,
        });
    }

    if let Some(weight) = feature.weight
        && !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weight)
    {
        return Err(CatalogError::WeightOutOfRange {
            feature: feature.id.clone(),
            weight,
        });
    }

    Ok(())
}
