//! Dashboard assembly.
//!
//! Runs the whole pipeline for one upload: ingest, normalize, derive hours,
//! filter, then every aggregation and the clustering step, collected into a
//! single [`DashboardReport`].

use std::io::Read;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::DashboardConfig;
use crate::error::EngineResult;
use crate::ingest::read_records;
use crate::models::{
    AttendanceRecord, DashboardReport, DimensionFilter, FilterOptions, RawRecord, RecordFilter,
    ReportWarning,
};

use super::aggregation::{
    Dimension, mean_hours_by_dimension, monthly_hours_by_work_description, monthly_hours_trend,
    monthly_overtime_trend, summarize, under_threshold_by_compartment,
};
use super::clustering::cluster_employees;
use super::employee_day::{employee_days, overtime_days};
use super::filter::{apply_filters, filter_options, resolve_date_range};
use super::normalizer::normalize_records;
use super::working_hours::compute_records;

/// What the presentation layer selected.
///
/// Every field is optional: a missing bound falls back to the data's own
/// date span and a missing or `"All"` dimension does not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardQuery {
    /// First day of the selection (inclusive).
    pub start: Option<NaiveDate>,
    /// Last day of the selection (inclusive).
    pub end: Option<NaiveDate>,
    /// Directorate selection.
    pub directorate: Option<String>,
    /// Type-of-work selection.
    pub work_type: Option<String>,
    /// Position-grade selection.
    pub position_grade: Option<String>,
}

impl DashboardQuery {
    /// The dimension filters this query selects.
    pub fn record_filter(&self) -> RecordFilter {
        RecordFilter {
            directorate: DimensionFilter::from_selection(self.directorate.as_deref()),
            work_type: DimensionFilter::from_selection(self.work_type.as_deref()),
            position_grade: DimensionFilter::from_selection(self.position_grade.as_deref()),
        }
    }
}

/// Normalizes raw rows and derives their worked hours.
pub fn prepare_records(records: Vec<RawRecord>, config: &DashboardConfig) -> Vec<AttendanceRecord> {
    compute_records(normalize_records(records, &config.normalization))
}

/// Builds the dashboard for a prepared record set.
///
/// `today` is only used when the query leaves a date bound open and the
/// data has no parseable attendance date at all.
pub fn build_dashboard(
    records: &[AttendanceRecord],
    query: &DashboardQuery,
    config: &DashboardConfig,
    today: NaiveDate,
) -> DashboardReport {
    let start_time = Instant::now();
    let report_id = Uuid::new_v4();
    let mut warnings = Vec::new();

    let open_bound = query.start.is_none() || query.end.is_none();
    if open_bound && records.iter().all(|r| r.record_date.is_none()) {
        warnings.push(ReportWarning::new(
            "DEFAULT_DATE_RANGE",
            format!(
                "No record has a parseable attendance date; the open date bound defaulted to {}",
                today
            ),
        ));
    }

    let date_range = resolve_date_range(records, query.start, query.end, today);
    if date_range.start_date > date_range.end_date {
        warnings.push(ReportWarning::new(
            "INVERTED_DATE_RANGE",
            format!(
                "Start date {} is after end date {}; nothing can match",
                date_range.start_date, date_range.end_date
            ),
        ));
    }

    let filters = query.record_filter();
    let filtered = apply_filters(records, &date_range, &filters);
    if filtered.is_empty() {
        warnings.push(ReportWarning::new(
            "EMPTY_SELECTION",
            "No records match the selected date range and filters",
        ));
    }

    let thresholds = &config.thresholds;
    let days = employee_days(&filtered);
    let overtime = overtime_days(&filtered, thresholds.overtime_hours);

    let clustering = cluster_employees(&days, &config.clustering);
    if !clustering.assignments.is_empty() && clustering.clusters.len() < config.clustering.clusters
    {
        warnings.push(ReportWarning::new(
            "CLUSTERS_REDUCED",
            format!(
                "Only {} cluster(s) could be formed out of {} requested",
                clustering.clusters.len(),
                config.clustering.clusters
            ),
        ));
    }

    let report = DashboardReport {
        report_id,
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        date_range,
        filters,
        total_records: records.len(),
        summary: summarize(&filtered, &days, &overtime, thresholds),
        monthly_overtime_trend: monthly_overtime_trend(&overtime),
        hours_by_compartment: mean_hours_by_dimension(&filtered, &days, Dimension::Compartment),
        hours_by_job_category: mean_hours_by_dimension(&filtered, &days, Dimension::JobCategory),
        hours_by_position_grade: mean_hours_by_dimension(
            &filtered,
            &days,
            Dimension::PositionGrade,
        ),
        hours_by_generation: mean_hours_by_dimension(&filtered, &days, Dimension::Generation),
        monthly_hours_by_work_description: monthly_hours_by_work_description(&filtered),
        monthly_hours_trend: monthly_hours_trend(&days),
        under_threshold_by_compartment: under_threshold_by_compartment(
            &filtered,
            thresholds.early_departure_hours,
        ),
        clustering,
        warnings,
        duration_us: start_time.elapsed().as_micros() as u64,
    };

    for warning in &report.warnings {
        warn!(report_id = %report_id, code = %warning.code, "{}", warning.message);
    }
    info!(
        report_id = %report_id,
        records = report.total_records,
        selected = report.summary.record_count,
        employees = report.summary.employee_count,
        corrections = report.summary.correction_count,
        overtime_days = report.summary.overtime_days,
        duration_us = report.duration_us,
        "Dashboard built"
    );

    report
}

/// Reads a CSV export and builds its dashboard.
///
/// # Errors
///
/// Fails only when the file itself cannot be read: missing required columns
/// or malformed CSV. Bad values inside a readable file never fail the run.
pub fn process_csv<R: Read>(
    reader: R,
    query: &DashboardQuery,
    config: &DashboardConfig,
    today: NaiveDate,
) -> EngineResult<DashboardReport> {
    let records = prepare_records(read_records(reader)?, config);
    Ok(build_dashboard(&records, query, config, today))
}

/// Reads a CSV export and lists the values its filters can select.
pub fn options_from_csv<R: Read>(
    reader: R,
    config: &DashboardConfig,
) -> EngineResult<FilterOptions> {
    let records = prepare_records(read_records(reader)?, config);
    Ok(filter_options(&records))
}
