//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has a
//! `Default` matching `config/dashboard.yaml`, so a missing section in the
//! file falls back to the shipped behaviour.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Markers that identify placeholder punches in the attendance export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Time value the clock system writes for a punch that never happened.
    pub sentinel_time: NaiveTime,
    /// Checkout date that, together with the sentinel time, marks a void punch.
    pub void_punch_date: NaiveDate,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            sentinel_time: NaiveTime::from_hms_opt(12, 12, 12).expect("Valid sentinel time"),
            void_punch_date: NaiveDate::from_ymd_opt(2000, 1, 1).expect("Valid void punch date"),
        }
    }
}

/// Hour and clock thresholds used by the aggregation metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Worked hours at or above which a record counts as overtime.
    pub overtime_hours: Decimal,
    /// Worked hours below which a record counts as an early departure.
    pub early_departure_hours: Decimal,
    /// Check-ins strictly after this time of day are late.
    pub late_checkin_after: NaiveTime,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            overtime_hours: Decimal::new(10, 0),
            early_departure_hours: Decimal::new(9, 0),
            late_checkin_after: NaiveTime::from_hms_opt(8, 30, 0).expect("Valid late check-in time"),
        }
    }
}

/// Parameters of the employee clustering step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Number of clusters (k).
    pub clusters: usize,
    /// Seed for centroid initialisation.
    pub seed: u64,
    /// Upper bound on Lloyd iterations per run.
    pub max_iterations: usize,
    /// Number of independently seeded runs; the lowest-inertia run wins.
    pub n_init: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            clusters: 3,
            seed: 42,
            max_iterations: 300,
            n_init: 10,
        }
    }
}

/// HTTP server limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Largest CSV upload accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 200 * 1024 * 1024,
        }
    }
}

/// The complete engine configuration.
///
/// # Example
///
/// ```
/// use attendance_engine::config::DashboardConfig;
/// use rust_decimal::Decimal;
///
/// let config = DashboardConfig::default();
/// assert_eq!(config.thresholds.overtime_hours, Decimal::new(10, 0));
/// assert_eq!(config.clustering.clusters, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Placeholder punch markers.
    pub normalization: NormalizationConfig,
    /// Metric thresholds.
    pub thresholds: ThresholdConfig,
    /// Clustering parameters.
    pub clustering: ClusteringConfig,
    /// HTTP server limits.
    pub server: ServerConfig,
}
