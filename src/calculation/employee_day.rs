//! Employee-day and overtime-day derivation.
//!
//! An employee may punch more than once on the same day. Daily figures
//! average those records into one [`EmployeeDay`]; overtime is counted once
//! per [`OvertimeDay`] however many qualifying records the day has.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AttendanceRecord;

/// One employee's mean worked hours for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDay {
    /// Employee identifier.
    pub employee_id: String,
    /// Attendance day.
    pub record_date: NaiveDate,
    /// Mean of the day's non-null worked hours; `None` when every record is null.
    pub mean_hours: Option<Decimal>,
}

/// A day on which an employee has at least one overtime record.
///
/// Overtime records without an employee id share one `None` key per day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OvertimeDay {
    /// Employee identifier, if the export had one.
    pub employee_id: Option<String>,
    /// Attendance day.
    pub record_date: NaiveDate,
}

/// Arithmetic mean of `values`, or `None` when there are none.
pub(crate) fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let total: Decimal = values.iter().sum();
    total.checked_div(Decimal::from(values.len()))
}

/// Collapses records into one row per (employee, day), ordered by employee
/// then day.
///
/// Undated records have no day to belong to and records without an
/// employee id have no employee; both are skipped.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::employee_days;
/// use attendance_engine::models::{AttendanceRecord, DimensionTags};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let punch = |hours: i64| AttendanceRecord {
///     employee_id: Some("E1".to_string()),
///     record_date: NaiveDate::from_ymd_opt(2024, 1, 1),
///     tags: DimensionTags::default(),
///     correction: None,
///     worked_hours: Some(Decimal::new(hours, 0)),
///     checkin_instant: None,
///     checkout_instant: None,
/// };
///
/// let days = employee_days(&[punch(4), punch(8)]);
/// assert_eq!(days.len(), 1);
/// assert_eq!(days[0].mean_hours, Some(Decimal::new(6, 0)));
/// ```
pub fn employee_days(records: &[AttendanceRecord]) -> Vec<EmployeeDay> {
    let mut grouped: BTreeMap<(&str, NaiveDate), Vec<Decimal>> = BTreeMap::new();
    for record in records {
        let (Some(employee_id), Some(date)) = (record.employee_id.as_deref(), record.record_date)
        else {
            continue;
        };
        let hours = grouped.entry((employee_id, date)).or_default();
        if let Some(worked) = record.worked_hours {
            hours.push(worked);
        }
    }

    grouped
        .into_iter()
        .map(|((employee_id, record_date), hours)| EmployeeDay {
            employee_id: employee_id.to_string(),
            record_date,
            mean_hours: mean(&hours),
        })
        .collect()
}

/// The deduplicated set of days on which an employee reached `threshold`.
///
/// A day qualifies when any single record of it reaches the threshold.
pub fn overtime_days(records: &[AttendanceRecord], threshold: Decimal) -> BTreeSet<OvertimeDay> {
    records
        .iter()
        .filter(|record| record.overtime_flag(threshold) == 1)
        .filter_map(|record| {
            record.record_date.map(|record_date| OvertimeDay {
                employee_id: record.employee_id.clone(),
                record_date,
            })
        })
        .collect()
}
