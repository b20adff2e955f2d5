//! Shared fixtures for integration tests

pub mod loader;

pub use loader::{FixtureLoader, create_test_aggregator, current_versions, tabular_agents};
