//! Record filtering.
//!
//! Applies the presentation layer's selection (an inclusive date range and
//! three dimension filters) to the derived record set.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    AttendanceRecord, DateRange, DimensionTags, FilterOptions, RecordFilter, WILDCARD, sort_labels,
};

/// Keeps the records dated within `range` whose tags pass `filter`.
///
/// Records without a parseable attendance date never fall inside a range.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::apply_filters;
/// use attendance_engine::models::{AttendanceRecord, DateRange, DimensionTags, RecordFilter};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let record = AttendanceRecord {
///     employee_id: Some("E1".to_string()),
///     record_date: Some(day),
///     tags: DimensionTags::default(),
///     correction: None,
///     worked_hours: None,
///     checkin_instant: None,
///     checkout_instant: None,
/// };
///
/// let kept = apply_filters(&[record], &DateRange::single_day(day), &RecordFilter::default());
/// assert_eq!(kept.len(), 1);
/// ```
pub fn apply_filters(
    records: &[AttendanceRecord],
    range: &DateRange,
    filter: &RecordFilter,
) -> Vec<AttendanceRecord> {
    let kept: Vec<AttendanceRecord> = records
        .iter()
        .filter(|record| {
            record
                .record_date
                .is_some_and(|date| range.contains_date(date))
                && filter.matches(&record.tags)
        })
        .cloned()
        .collect();

    debug!(
        input = records.len(),
        kept = kept.len(),
        start = %range.start_date,
        end = %range.end_date,
        "Filters applied"
    );
    kept
}

/// The date range selected when the user has not picked one.
///
/// Spans the earliest to the latest attendance date in `records`; when no
/// record has a parseable date it is `today..today` (see
/// [`DateRange::spanning`]).
pub fn default_date_range(records: &[AttendanceRecord], today: NaiveDate) -> DateRange {
    DateRange::spanning(records.iter().filter_map(|r| r.record_date), today)
}

/// Resolves a possibly partial selection against the data's default range.
pub fn resolve_date_range(
    records: &[AttendanceRecord],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> DateRange {
    match (start, end) {
        (Some(start), Some(end)) => DateRange::new(start, end),
        _ => {
            let default = default_date_range(records, today);
            DateRange::new(
                start.unwrap_or(default.start_date),
                end.unwrap_or(default.end_date),
            )
        }
    }
}

/// Lists the selectable values of each filterable dimension.
///
/// Values are distinct and ordered by [`sort_labels`], missing tags are
/// skipped, and `"All"` comes first.
pub fn filter_options(records: &[AttendanceRecord]) -> FilterOptions {
    FilterOptions {
        directorates: distinct_with_wildcard(records, |tags| tags.directorate.as_deref()),
        work_types: distinct_with_wildcard(records, |tags| tags.work_type.as_deref()),
        position_grades: distinct_with_wildcard(records, |tags| tags.position_grade.as_deref()),
    }
}

fn distinct_with_wildcard(
    records: &[AttendanceRecord],
    select: fn(&DimensionTags) -> Option<&str>,
) -> Vec<String> {
    let distinct: BTreeSet<&str> = records.iter().filter_map(|r| select(&r.tags)).collect();
    let mut values: Vec<&str> = distinct.into_iter().collect();
    sort_labels(&mut values, |value| *value);
    std::iter::once(WILDCARD.to_string())
        .chain(values.into_iter().map(str::to_string))
        .collect()
}
