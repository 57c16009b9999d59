//! Working-hours derivation.
//!
//! Turns a [`NormalizedRecord`] into an [`AttendanceRecord`]: punch instants
//! are derived for every record, worked hours only for records that passed
//! the correction rules.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::{AttendanceRecord, NormalizedRecord};

use super::timestamp::parse_optional_instant;

const MILLISECONDS_PER_HOUR: i64 = 3_600_000;

/// Elapsed hours between two instants.
///
/// Returns `None` when checkout precedes check-in, so a swapped or corrupt
/// pair never produces negative worked time.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::calculate_working_hours;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let checkin = NaiveDateTime::parse_from_str("2024-01-01 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let checkout = NaiveDateTime::parse_from_str("2024-01-01 18:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// assert_eq!(calculate_working_hours(checkin, checkout), Some(Decimal::new(105, 1)));
/// assert_eq!(calculate_working_hours(checkout, checkin), None);
/// ```
pub fn calculate_working_hours(
    checkin: NaiveDateTime,
    checkout: NaiveDateTime,
) -> Option<Decimal> {
    let elapsed_ms = (checkout - checkin).num_milliseconds();
    if elapsed_ms < 0 {
        return None;
    }
    Decimal::new(elapsed_ms, 0).checked_div(Decimal::new(MILLISECONDS_PER_HOUR, 0))
}

/// Derives instants and worked hours for one record.
///
/// A record flagged for correction keeps `worked_hours = None` but still
/// gets its instants, since its check-in may be perfectly readable.
pub fn compute_record(record: NormalizedRecord) -> AttendanceRecord {
    let NormalizedRecord {
        raw,
        record_date,
        correction,
    } = record;

    let checkin_instant =
        parse_optional_instant(raw.checkin_date.as_deref(), raw.checkin_time.as_deref());
    let checkout_instant =
        parse_optional_instant(raw.checkout_date.as_deref(), raw.checkout_time.as_deref());

    let worked_hours = match (correction, checkin_instant, checkout_instant) {
        (None, Some(checkin), Some(checkout)) => {
            let hours = calculate_working_hours(checkin, checkout);
            if hours.is_none() {
                debug!(
                    employee_id = ?raw.employee_id,
                    %checkin,
                    %checkout,
                    "Checkout precedes check-in, duration left null"
                );
            }
            hours
        }
        _ => None,
    };

    AttendanceRecord {
        employee_id: raw.employee_id,
        record_date,
        tags: raw.tags,
        correction,
        worked_hours,
        checkin_instant,
        checkout_instant,
    }
}

/// Derives instants and worked hours for every record.
pub fn compute_records(records: Vec<NormalizedRecord>) -> Vec<AttendanceRecord> {
    let computed: Vec<AttendanceRecord> = records.into_iter().map(compute_record).collect();

    let with_hours = computed.iter().filter(|r| r.worked_hours.is_some()).count();
    let unflagged_without_hours = computed
        .iter()
        .filter(|r| !r.is_flagged() && r.worked_hours.is_none())
        .count();
    info!(
        records = computed.len(),
        with_hours,
        unflagged_without_hours,
        "Working hours derived"
    );

    computed
}
