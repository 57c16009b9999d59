//! Dashboard report models.
//!
//! This module contains the [`DashboardReport`] type and the series it is
//! made of. Every value is already rounded where the dashboard shows a
//! rounded figure, so the presentation layer renders it as is.

use std::collections::BTreeMap;
use std::ops::Index;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::{DateRange, RecordFilter, YearMonth, sort_labels};

/// Integer hours (or counts) keyed by dimension label.
///
/// Labels are ordered by [`sort_labels`]: numerically when every label is a
/// number, lexically otherwise. Serializes as a JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionSeries {
    entries: Vec<(String, i64)>,
}

impl DimensionSeries {
    /// The value for `label`, if the series has one.
    pub fn get(&self, label: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| *value)
    }

    /// Returns true when `label` has a value.
    pub fn contains_key(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Labels in series order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Label and value pairs in series order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the series has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, i64)> for DimensionSeries {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        let mut entries: Vec<(String, i64)> = iter.into_iter().collect();
        sort_labels(&mut entries, |(label, _)| label.as_str());
        Self { entries }
    }
}

impl Index<&str> for DimensionSeries {
    type Output = i64;

    fn index(&self, label: &str) -> &i64 {
        match self.entries.iter().find(|(key, _)| key == label) {
            Some((_, value)) => value,
            None => panic!("no value for label '{}'", label),
        }
    }
}

impl Serialize for DimensionSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DimensionSeries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, i64>::deserialize(deserializer)?;
        Ok(map.into_iter().collect())
    }
}

/// Integer values keyed by calendar month, in chronological order.
pub type MonthlySeries = BTreeMap<YearMonth, i64>;

/// Headline scalars for the filtered selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Records in the filtered selection.
    pub record_count: usize,
    /// Distinct employees in the filtered selection.
    pub employee_count: usize,
    /// Records that need correction: flagged, or with no computable duration.
    pub correction_count: usize,
    /// Records flagged by the correction rules alone.
    pub flagged_count: usize,
    /// Records with worked hours under the early-departure threshold.
    pub early_departures: usize,
    /// Records whose check-in time of day is after the late threshold.
    pub late_checkins: usize,
    /// Distinct (employee, day) pairs with an overtime record.
    pub overtime_days: usize,
    /// Mean of the employee-day means, to two decimals; `None` when no hours exist.
    pub mean_daily_hours: Option<Decimal>,
}

/// Monthly means pivoted so each label becomes its own series.
///
/// Every series has one entry per month in `months`, in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPivot {
    /// The months present in the grouping, chronological.
    pub months: Vec<YearMonth>,
    /// One series per label; missing cells are 0.
    pub series: BTreeMap<String, Vec<i64>>,
}

/// The cluster an employee was assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCluster {
    /// Employee identifier.
    pub employee_id: String,
    /// Sum of the employee's daily mean hours.
    pub total_hours: Decimal,
    /// Cluster label.
    pub cluster: usize,
}

/// Size and centre of one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Cluster label.
    pub cluster: usize,
    /// Number of employees assigned.
    pub employees: usize,
    /// Cluster centre in total hours, to two decimals.
    pub centroid: Decimal,
}

/// The result of grouping employees by total worked hours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusteringResult {
    /// One entry per employee, ordered by employee id.
    pub assignments: Vec<EmployeeCluster>,
    /// One entry per non-empty cluster, ordered by label.
    pub clusters: Vec<ClusterSummary>,
}

/// A condition worth showing next to the report without failing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

impl ReportWarning {
    /// Creates a warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Every metric the dashboard renders for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The date range applied.
    pub date_range: DateRange,
    /// The dimension filters applied.
    pub filters: RecordFilter,
    /// Rows read from the input, before filtering.
    pub total_records: usize,
    /// Headline scalars.
    pub summary: SummaryMetrics,
    /// Overtime days per month.
    pub monthly_overtime_trend: MonthlySeries,
    /// Mean daily hours by compartment.
    pub hours_by_compartment: DimensionSeries,
    /// Mean daily hours by job category.
    pub hours_by_job_category: DimensionSeries,
    /// Mean daily hours by position grade, numeric grades in numeric order.
    pub hours_by_position_grade: DimensionSeries,
    /// Mean daily hours by generation.
    pub hours_by_generation: DimensionSeries,
    /// Monthly mean record hours per work-description label.
    pub monthly_hours_by_work_description: MonthlyPivot,
    /// Monthly mean of employee-day means.
    pub monthly_hours_trend: MonthlySeries,
    /// Records under the early-departure threshold, per compartment.
    pub under_threshold_by_compartment: DimensionSeries,
    /// Employees grouped by total worked hours.
    pub clustering: ClusteringResult,
    /// Non-fatal conditions encountered while building the report.
    pub warnings: Vec<ReportWarning>,
    /// Time taken to build the report, in microseconds.
    pub duration_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_series_serializes_with_month_keys() {
        let mut series = MonthlySeries::new();
        series.insert(YearMonth::new(2024, 2), 3);
        series.insert(YearMonth::new(2024, 1), 5);

        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"{"2024-01":5,"2024-02":3}"#);
    }

    #[test]
    fn test_monthly_series_round_trips() {
        let mut series = MonthlySeries::new();
        series.insert(YearMonth::new(2023, 12), 9);

        let json = serde_json::to_string(&series).unwrap();
        let back: MonthlySeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);
    }

    #[test]
    fn test_dimension_series_orders_numeric_labels() {
        let series: DimensionSeries = vec![
            ("10".to_string(), 8),
            ("2".to_string(), 9),
            ("1".to_string(), 7),
        ]
        .into_iter()
        .collect();

        assert_eq!(series.keys().collect::<Vec<_>>(), vec!["1", "2", "10"]);
        assert_eq!(series["2"], 9);
        assert_eq!(series.get("3"), None);

        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"{"1":7,"2":9,"10":8}"#);
        let back: DimensionSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);
    }

    #[test]
    fn test_summary_decimal_serializes_as_string() {
        let summary = SummaryMetrics {
            mean_daily_hours: Some(Decimal::new(925, 2)),
            ..Default::default()
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"mean_daily_hours\":\"9.25\""));
    }

    #[test]
    fn test_warning_constructor() {
        let warning = ReportWarning::new("EMPTY_SELECTION", "No records matched");
        assert_eq!(warning.code, "EMPTY_SELECTION");
        assert_eq!(warning.message, "No records matched");
    }
}
