//! Configuration loading and management for the attendance engine.
//!
//! The configuration holds the placeholder-punch markers, the metric
//! thresholds, the clustering parameters and the HTTP upload limit.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/dashboard.yaml").unwrap();
//! println!("k = {}", loader.config().clustering.clusters);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
pub use types::{
    ClusteringConfig, DashboardConfig, NormalizationConfig, ServerConfig, ThresholdConfig,
};
