//! Calculation pipeline for the attendance dashboard.
//!
//! The stages run in this order, each producing a new record set:
//! timestamp parsing and correction classification ([`normalize_records`]),
//! worked-hours derivation ([`compute_records`]), filtering
//! ([`apply_filters`]), per employee-day collapsing ([`employee_days`]),
//! aggregation and clustering. [`build_dashboard`] runs all of them.

mod aggregation;
mod clustering;
mod dashboard;
mod employee_day;
mod filter;
mod normalizer;
mod timestamp;
mod working_hours;

pub use aggregation::{
    Dimension, mean_daily_hours, mean_hours_by_dimension, monthly_hours_by_work_description,
    monthly_hours_trend, monthly_overtime_trend, round_hours, summarize,
    under_threshold_by_compartment,
};
pub use clustering::{cluster_employees, employee_totals};
pub use dashboard::{
    DashboardQuery, build_dashboard, options_from_csv, prepare_records, process_csv,
};
pub use employee_day::{EmployeeDay, OvertimeDay, employee_days, overtime_days};
pub use filter::{apply_filters, default_date_range, filter_options, resolve_date_range};
pub use normalizer::{
    CORRECTION_RULES, RuleCheck, classify_record, normalize_record, normalize_records,
};
pub use timestamp::{DATE_FORMATS, TIME_FORMATS, parse_date, parse_instant, parse_time};
pub use working_hours::{calculate_working_hours, compute_record, compute_records};
