//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::DashboardConfig;

/// Default location of the configuration file, relative to the crate root.
pub const DEFAULT_CONFIG_PATH: &str = "./config/dashboard.yaml";

/// Loads and validates the engine configuration.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/dashboard.yaml")?;
/// println!("Overtime from {} hours", loader.config().thresholds.overtime_hours);
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: DashboardConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML or mistyped values
    /// - A value is out of range (see [`ConfigLoader::from_config`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: DashboardConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Self::from_config(config)
    }

    /// Wraps an in-memory configuration after validating it.
    pub fn from_config(config: DashboardConfig) -> EngineResult<Self> {
        validate(&config)?;
        Ok(Self { config })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}

fn validate(config: &DashboardConfig) -> EngineResult<()> {
    let invalid = |field: &str, message: &str| EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    };

    if config.thresholds.overtime_hours <= Decimal::ZERO {
        return Err(invalid("thresholds.overtime_hours", "must be positive"));
    }
    if config.thresholds.early_departure_hours <= Decimal::ZERO {
        return Err(invalid("thresholds.early_departure_hours", "must be positive"));
    }
    if config.clustering.clusters == 0 {
        return Err(invalid("clustering.clusters", "must be at least 1"));
    }
    if config.clustering.max_iterations == 0 {
        return Err(invalid("clustering.max_iterations", "must be at least 1"));
    }
    if config.clustering.n_init == 0 {
        return Err(invalid("clustering.n_init", "must be at least 1"));
    }
    if config.server.max_body_bytes == 0 {
        return Err(invalid("server.max_body_bytes", "must be at least 1"));
    }
    Ok(())
}
