//! Core data models for the attendance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod filter;
mod label;
mod period;
mod record;
mod report;

pub use filter::{DimensionFilter, FilterOptions, RecordFilter, WILDCARD};
pub use label::sort_labels;
pub use period::{DateRange, YearMonth};
pub use record::{AttendanceRecord, CorrectionReason, DimensionTags, NormalizedRecord, RawRecord};
pub use report::{
    ClusterSummary, ClusteringResult, DashboardReport, DimensionSeries, EmployeeCluster,
    MonthlyPivot, MonthlySeries, ReportWarning, SummaryMetrics,
};
