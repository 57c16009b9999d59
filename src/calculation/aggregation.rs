//! Aggregation engine.
//!
//! Every function here works on an already filtered record set. Hour means
//! are rounded to whole hours (half to even) before they leave this module;
//! a group whose values are all null reports 0 rather than disappearing.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::ThresholdConfig;
use crate::models::{
    AttendanceRecord, DimensionSeries, DimensionTags, MonthlyPivot, MonthlySeries, SummaryMetrics,
    YearMonth,
};

use super::employee_day::{EmployeeDay, OvertimeDay, mean};

/// An organizational dimension a breakdown can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// `dir_title`
    Directorate,
    /// `type_work_name`
    WorkType,
    /// `pos_grade`
    PositionGrade,
    /// `komp_title`
    Compartment,
    /// `kategori_jabatan`
    JobCategory,
    /// `generasi`
    Generation,
    /// `jk_keterangan_name`
    WorkDescription,
}

impl Dimension {
    /// The tag value this dimension selects, if present.
    pub fn value_of(self, tags: &DimensionTags) -> Option<&str> {
        let value = match self {
            Dimension::Directorate => &tags.directorate,
            Dimension::WorkType => &tags.work_type,
            Dimension::PositionGrade => &tags.position_grade,
            Dimension::Compartment => &tags.compartment,
            Dimension::JobCategory => &tags.job_category,
            Dimension::Generation => &tags.generation,
            Dimension::WorkDescription => &tags.work_description,
        };
        value.as_deref()
    }
}

/// Rounds an hour figure to a whole number, half to even.
pub fn round_hours(value: Decimal) -> i64 {
    value.round().to_i64().unwrap_or(0)
}

fn rounded_mean_or_zero(values: &[Decimal]) -> i64 {
    mean(values).map(round_hours).unwrap_or(0)
}

/// Computes the headline scalars for a filtered selection.
pub fn summarize(
    records: &[AttendanceRecord],
    days: &[EmployeeDay],
    overtime: &BTreeSet<OvertimeDay>,
    thresholds: &ThresholdConfig,
) -> SummaryMetrics {
    let employees: HashSet<&str> = records
        .iter()
        .filter_map(|r| r.employee_id.as_deref())
        .collect();

    SummaryMetrics {
        record_count: records.len(),
        employee_count: employees.len(),
        correction_count: records.iter().filter(|r| r.needs_correction()).count(),
        flagged_count: records.iter().filter(|r| r.is_flagged()).count(),
        early_departures: records
            .iter()
            .filter(|r| r.is_under(thresholds.early_departure_hours))
            .count(),
        late_checkins: records
            .iter()
            .filter(|r| {
                r.checkin_instant
                    .is_some_and(|instant| instant.time() > thresholds.late_checkin_after)
            })
            .count(),
        overtime_days: overtime.len(),
        mean_daily_hours: mean_daily_hours(days),
    }
}

/// Mean of all non-null employee-day means, to two decimals.
pub fn mean_daily_hours(days: &[EmployeeDay]) -> Option<Decimal> {
    let means: Vec<Decimal> = days.iter().filter_map(|d| d.mean_hours).collect();
    mean(&means).map(|value| value.round_dp(2))
}

/// Overtime days per calendar month, chronological. Months without any
/// overtime day are absent.
pub fn monthly_overtime_trend(overtime: &BTreeSet<OvertimeDay>) -> MonthlySeries {
    let mut trend = MonthlySeries::new();
    for day in overtime {
        *trend.entry(YearMonth::of(day.record_date)).or_default() += 1;
    }
    trend
}

/// Mean employee-day hours per value of `dimension`.
///
/// Each employee-day counts toward every distinct value of `dimension` its
/// employee carries anywhere in `records`. Records whose tag or employee id
/// is missing contribute no group. Labels are ordered by
/// [`crate::models::sort_labels`].
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{Dimension, employee_days, mean_hours_by_dimension};
/// use attendance_engine::models::{AttendanceRecord, DimensionTags};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = |id: &str, compartment: &str, hours: i64| AttendanceRecord {
///     employee_id: Some(id.to_string()),
///     record_date: NaiveDate::from_ymd_opt(2024, 1, 1),
///     tags: DimensionTags {
///         compartment: Some(compartment.to_string()),
///         ..Default::default()
///     },
///     correction: None,
///     worked_hours: Some(Decimal::new(hours, 0)),
///     checkin_instant: None,
///     checkout_instant: None,
/// };
///
/// let records = vec![record("E1", "K1", 8), record("E2", "K1", 10), record("E3", "K2", 7)];
/// let days = employee_days(&records);
/// let series = mean_hours_by_dimension(&records, &days, Dimension::Compartment);
///
/// assert_eq!(series["K1"], 9);
/// assert_eq!(series["K2"], 7);
/// ```
pub fn mean_hours_by_dimension(
    records: &[AttendanceRecord],
    days: &[EmployeeDay],
    dimension: Dimension,
) -> DimensionSeries {
    let mut values_by_employee: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        if let (Some(employee_id), Some(value)) =
            (record.employee_id.as_deref(), dimension.value_of(&record.tags))
        {
            values_by_employee
                .entry(employee_id)
                .or_default()
                .insert(value);
        }
    }

    let mut groups: BTreeMap<&str, Vec<Decimal>> = BTreeMap::new();
    for day in days {
        let Some(values) = values_by_employee.get(day.employee_id.as_str()) else {
            continue;
        };
        for value in values {
            let hours = groups.entry(*value).or_default();
            if let Some(mean_hours) = day.mean_hours {
                hours.push(mean_hours);
            }
        }
    }

    groups
        .into_iter()
        .map(|(value, hours)| (value.to_string(), rounded_mean_or_zero(&hours)))
        .collect()
}

/// Monthly mean worked hours per work-description label, over raw records.
///
/// Unlike the dimension breakdowns this does not average per employee-day
/// first. Every label gets one cell per month; empty cells are 0.
pub fn monthly_hours_by_work_description(records: &[AttendanceRecord]) -> MonthlyPivot {
    let mut cells: BTreeMap<(YearMonth, &str), Vec<Decimal>> = BTreeMap::new();
    for record in records {
        let (Some(date), Some(label)) = (
            record.record_date,
            Dimension::WorkDescription.value_of(&record.tags),
        ) else {
            continue;
        };
        let hours = cells.entry((YearMonth::of(date), label)).or_default();
        if let Some(worked) = record.worked_hours {
            hours.push(worked);
        }
    }

    let months: Vec<YearMonth> = cells
        .keys()
        .map(|(month, _)| *month)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let labels: BTreeSet<&str> = cells.keys().map(|(_, label)| *label).collect();

    let series: BTreeMap<String, Vec<i64>> = labels
        .into_iter()
        .map(|label| {
            let row: Vec<i64> = months
                .iter()
                .map(|month| {
                    cells
                        .get(&(*month, label))
                        .map(|hours| rounded_mean_or_zero(hours))
                        .unwrap_or(0)
                })
                .collect();
            (label.to_string(), row)
        })
        .collect();

    MonthlyPivot { months, series }
}

/// Monthly mean of the employee-day means.
pub fn monthly_hours_trend(days: &[EmployeeDay]) -> MonthlySeries {
    let mut groups: BTreeMap<YearMonth, Vec<Decimal>> = BTreeMap::new();
    for day in days {
        let hours = groups.entry(YearMonth::of(day.record_date)).or_default();
        if let Some(mean_hours) = day.mean_hours {
            hours.push(mean_hours);
        }
    }

    groups
        .into_iter()
        .map(|(month, hours)| (month, rounded_mean_or_zero(&hours)))
        .collect()
}

/// Number of records under `threshold` hours per compartment.
///
/// This counts records, not distinct employees, so records without an
/// employee id are included.
pub fn under_threshold_by_compartment(
    records: &[AttendanceRecord],
    threshold: Decimal,
) -> DimensionSeries {
    let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_under(threshold)) {
        if let Some(compartment) = Dimension::Compartment.value_of(&record.tags) {
            *counts.entry(compartment).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(compartment, count)| (compartment.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::employee_day::{employee_days, overtime_days};
    use crate::models::CorrectionReason;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn record(id: &str, day: NaiveDate, hours: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: Some(id.to_string()),
            record_date: Some(day),
            tags: DimensionTags {
                compartment: Some("K1".to_string()),
                job_category: Some("Staff".to_string()),
                position_grade: Some("G1".to_string()),
                generation: Some("Gen Z".to_string()),
                work_description: Some("Regular".to_string()),
                ..Default::default()
            },
            correction: None,
            worked_hours: hours.map(dec),
            checkin_instant: None,
            checkout_instant: None,
        }
    }

    fn with_checkin(mut record: AttendanceRecord, time: &str) -> AttendanceRecord {
        record.checkin_instant = Some(
            NaiveDateTime::parse_from_str(&format!("2024-01-01 {}", time), "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        );
        record
    }

    fn summary_of(records: &[AttendanceRecord]) -> SummaryMetrics {
        let thresholds = ThresholdConfig::default();
        let days = employee_days(records);
        let overtime = overtime_days(records, thresholds.overtime_hours);
        summarize(records, &days, &overtime, &thresholds)
    }

    /// AG-001: correction count covers flagged and null-duration records once each
    #[test]
    fn test_correction_count() {
        let mut flagged = record("E1", date(1, 1), None);
        flagged.correction = Some(CorrectionReason::VoidPunch);
        let records = vec![
            flagged,
            record("E2", date(1, 1), None),
            record("E3", date(1, 1), Some("8")),
        ];
        let summary = summary_of(&records);

        assert_eq!(summary.correction_count, 2);
        assert_eq!(summary.flagged_count, 1);
    }

    /// AG-002: early departures exclude null hours
    #[test]
    fn test_early_departures() {
        let records = vec![
            record("E1", date(1, 1), Some("8.99")),
            record("E2", date(1, 1), Some("9")),
            record("E3", date(1, 1), None),
        ];
        assert_eq!(summary_of(&records).early_departures, 1);
    }

    /// AG-003: late check-in is strictly after 08:30:00, flagged records included
    #[test]
    fn test_late_checkins() {
        let mut flagged = with_checkin(record("E3", date(1, 1), None), "09:15:00");
        flagged.correction = Some(CorrectionReason::VoidPunch);
        let records = vec![
            with_checkin(record("E1", date(1, 1), Some("8")), "08:30:00"),
            with_checkin(record("E2", date(1, 1), Some("8")), "08:30:01"),
            flagged,
            record("E4", date(1, 1), Some("8")),
        ];
        assert_eq!(summary_of(&records).late_checkins, 2);
    }

    #[test]
    fn test_summary_counts_and_mean() {
        let records = vec![
            record("E1", date(1, 1), Some("8")),
            record("E1", date(1, 1), Some("10")),
            record("E2", date(1, 2), Some("7.5")),
        ];
        let summary = summary_of(&records);

        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.employee_count, 2);
        assert_eq!(summary.overtime_days, 1);
        // Day means 9 and 7.5
        assert_eq!(summary.mean_daily_hours, Some(dec("8.25")));
    }

    /// AG-004: empty selection gives zeros and empty series
    #[test]
    fn test_empty_selection() {
        let summary = summary_of(&[]);
        assert_eq!(summary, SummaryMetrics::default());
        assert!(monthly_overtime_trend(&BTreeSet::new()).is_empty());
        assert!(mean_hours_by_dimension(&[], &[], Dimension::Compartment).is_empty());
        assert_eq!(monthly_hours_by_work_description(&[]), MonthlyPivot::default());
        assert!(monthly_hours_trend(&[]).is_empty());
        assert!(under_threshold_by_compartment(&[], dec("9")).is_empty());
    }

    #[test]
    fn test_monthly_overtime_trend_is_chronological() {
        let records = vec![
            record("E1", date(2, 3), Some("11")),
            record("E1", date(1, 3), Some("10")),
            record("E2", date(1, 3), Some("12")),
            record("E2", date(1, 3), Some("12")),
        ];
        let trend = monthly_overtime_trend(&overtime_days(&records, dec("10")));

        let entries: Vec<(String, i64)> = trend.iter().map(|(m, c)| (m.to_string(), *c)).collect();
        assert_eq!(
            entries,
            vec![("2024-01".to_string(), 2), ("2024-02".to_string(), 1)]
        );
    }

    /// AG-005: dimension means are taken over employee-day means
    #[test]
    fn test_dimension_mean_uses_employee_days() {
        // E1 has two records on one day (8 and 12 -> 10), E2 one record of 7.
        // Raw mean would be 9; employee-day mean is (10 + 7) / 2 = 8.5 -> 8.
        let records = vec![
            record("E1", date(1, 1), Some("8")),
            record("E1", date(1, 1), Some("12")),
            record("E2", date(1, 1), Some("7")),
        ];
        let days = employee_days(&records);
        let series = mean_hours_by_dimension(&records, &days, Dimension::Compartment);
        assert_eq!(series["K1"], 8);
    }

    #[test]
    fn test_dimension_all_null_group_is_zero() {
        let mut other = record("E2", date(1, 1), None);
        other.tags.compartment = Some("K2".to_string());
        let records = vec![record("E1", date(1, 1), Some("8")), other];
        let days = employee_days(&records);
        let series = mean_hours_by_dimension(&records, &days, Dimension::Compartment);

        assert_eq!(series["K1"], 8);
        assert_eq!(series["K2"], 0);
    }

    #[test]
    fn test_dimension_missing_tag_has_no_group() {
        let mut untagged = record("E2", date(1, 1), Some("8"));
        untagged.tags.generation = None;
        let records = vec![record("E1", date(1, 1), Some("8")), untagged];
        let days = employee_days(&records);
        let series = mean_hours_by_dimension(&records, &days, Dimension::Generation);

        assert_eq!(series.len(), 1);
        assert_eq!(series["Gen Z"], 8);
    }

    #[test]
    fn test_employee_with_two_values_counts_in_both() {
        let mut moved = record("E1", date(1, 2), Some("10"));
        moved.tags.compartment = Some("K2".to_string());
        let records = vec![record("E1", date(1, 1), Some("8")), moved];
        let days = employee_days(&records);
        let series = mean_hours_by_dimension(&records, &days, Dimension::Compartment);

        // Both days join both compartments: mean (8 + 10) / 2 = 9 each.
        assert_eq!(series["K1"], 9);
        assert_eq!(series["K2"], 9);
    }

    fn grade_labels(grades: &[&str]) -> Vec<String> {
        let records: Vec<AttendanceRecord> = grades
            .iter()
            .enumerate()
            .map(|(i, grade)| {
                let mut r = record(&format!("E{}", i), date(1, 1), Some("8"));
                r.tags.position_grade = Some(grade.to_string());
                r
            })
            .collect();
        let days = employee_days(&records);
        mean_hours_by_dimension(&records, &days, Dimension::PositionGrade)
            .keys()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_position_grades_are_label_ordered() {
        assert_eq!(grade_labels(&["G10", "G2", "G1"]), vec!["G1", "G10", "G2"]);
    }

    #[test]
    fn test_numeric_position_grades_are_numerically_ordered() {
        assert_eq!(grade_labels(&["10", "2", "1"]), vec!["1", "2", "10"]);
    }

    /// AG-008: records without an employee id stay out of per-employee figures
    #[test]
    fn test_records_without_employee_id() {
        let mut long_day = record("E1", date(1, 1), Some("12"));
        long_day.employee_id = None;
        let mut short_day = record("E1", date(1, 1), Some("4"));
        short_day.employee_id = None;
        short_day.tags.compartment = Some("K2".to_string());
        let mut known = record("E1", date(1, 1), Some("9"));
        known.tags.compartment = Some("K2".to_string());
        let records = vec![long_day, short_day, known];

        let days = employee_days(&records);
        let series = mean_hours_by_dimension(&records, &days, Dimension::Compartment);
        assert_eq!(series.keys().collect::<Vec<_>>(), vec!["K2"]);
        assert_eq!(series["K2"], 9);

        let summary = summary_of(&records);
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.employee_count, 1);
        assert_eq!(summary.early_departures, 1);
        assert_eq!(summary.overtime_days, 1);
        assert_eq!(summary.mean_daily_hours, Some(dec("9")));

        let counts = under_threshold_by_compartment(&records, dec("9"));
        assert_eq!(counts["K2"], 1);
    }

    #[test]
    fn test_round_hours_is_half_to_even() {
        assert_eq!(round_hours(dec("8.5")), 8);
        assert_eq!(round_hours(dec("9.5")), 10);
        assert_eq!(round_hours(dec("7.51")), 8);
    }

    /// AG-006: pivot fills missing cells with 0
    #[test]
    fn test_work_description_pivot() {
        let mut overtime = record("E1", date(2, 1), Some("11"));
        overtime.tags.work_description = Some("Shift".to_string());
        let records = vec![
            record("E1", date(1, 1), Some("8")),
            record("E1", date(1, 1), Some("12")),
            record("E2", date(1, 1), Some("7")),
            overtime,
        ];
        let pivot = monthly_hours_by_work_description(&records);

        assert_eq!(pivot.months, vec![YearMonth::new(2024, 1), YearMonth::new(2024, 2)]);
        // Raw-record mean: (8 + 12 + 7) / 3 = 9
        assert_eq!(pivot.series["Regular"], vec![9, 0]);
        assert_eq!(pivot.series["Shift"], vec![0, 11]);
    }

    #[test]
    fn test_monthly_hours_trend() {
        let records = vec![
            record("E1", date(1, 1), Some("8")),
            record("E1", date(1, 1), Some("12")),
            record("E2", date(1, 1), Some("7")),
            record("E2", date(2, 1), None),
        ];
        let trend = monthly_hours_trend(&employee_days(&records));

        assert_eq!(trend[&YearMonth::new(2024, 1)], 8);
        assert_eq!(trend[&YearMonth::new(2024, 2)], 0);
    }

    /// AG-007: under-threshold counts records per compartment
    #[test]
    fn test_under_threshold_by_compartment() {
        let mut other = record("E3", date(1, 1), Some("5"));
        other.tags.compartment = Some("K2".to_string());
        let mut untagged = record("E4", date(1, 1), Some("5"));
        untagged.tags.compartment = None;
        let records = vec![
            record("E1", date(1, 1), Some("8")),
            record("E1", date(1, 2), Some("6")),
            record("E2", date(1, 1), Some("9")),
            record("E2", date(1, 2), None),
            other,
            untagged,
        ];
        let counts = under_threshold_by_compartment(&records, dec("9"));

        assert_eq!(counts["K1"], 2);
        assert_eq!(counts["K2"], 1);
        assert_eq!(counts.len(), 2);
    }
}
