//! Record normalization.
//!
//! Classifies each raw record as computable or as needing correction
//! ("lupa/perbaikan absensi"). The classification is an ordered list of
//! rules; a record needs correction when any rule matches, and the first
//! matching rule is recorded as the reason.

use std::collections::HashMap;

use tracing::info;

use crate::config::NormalizationConfig;
use crate::models::{CorrectionReason, NormalizedRecord, RawRecord};

use super::timestamp::parse_date;

/// Predicate deciding whether a record violates one correction rule.
pub type RuleCheck = fn(&RawRecord, &NormalizationConfig) -> bool;

/// The correction rules, in evaluation order.
pub const CORRECTION_RULES: [(CorrectionReason, RuleCheck); 3] = [
    (CorrectionReason::MissingDate, missing_punch_date),
    (CorrectionReason::VoidPunch, void_punch),
    (CorrectionReason::MissingOrSentinelTime, missing_or_sentinel_time),
];

fn missing_punch_date(record: &RawRecord, _: &NormalizationConfig) -> bool {
    [&record.checkin_date, &record.checkout_date]
        .into_iter()
        .any(|date| date.as_deref().and_then(parse_date).is_none())
}

fn void_punch(record: &RawRecord, config: &NormalizationConfig) -> bool {
    is_sentinel_time(record.checkout_time.as_deref(), config)
        && record.checkout_date.as_deref().and_then(parse_date) == Some(config.void_punch_date)
}

fn missing_or_sentinel_time(record: &RawRecord, config: &NormalizationConfig) -> bool {
    [&record.checkin_time, &record.checkout_time]
        .into_iter()
        .any(|time| time.is_none() || is_sentinel_time(time.as_deref(), config))
}

/// Matches the sentinel as written (`HH:MM:SS`); `12:12:12.000` or
/// `12:12` are ordinary times.
fn is_sentinel_time(time: Option<&str>, config: &NormalizationConfig) -> bool {
    time.is_some_and(|time| time.trim() == config.sentinel_time.format("%H:%M:%S").to_string())
}

/// Returns the first correction rule `record` violates, if any.
///
/// Missing values are judged on the raw `Option`, so nothing substituted
/// for a missing time later can hide it.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::classify_record;
/// use attendance_engine::config::NormalizationConfig;
/// use attendance_engine::models::{CorrectionReason, RawRecord};
///
/// let record = RawRecord {
///     employee_id: Some("E1".to_string()),
///     checkin_date: Some("2024-01-01".to_string()),
///     checkin_time: Some("08:00:00".to_string()),
///     checkout_date: Some("2000-01-01".to_string()),
///     checkout_time: Some("12:12:12".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(
///     classify_record(&record, &NormalizationConfig::default()),
///     Some(CorrectionReason::VoidPunch)
/// );
/// ```
pub fn classify_record(
    record: &RawRecord,
    config: &NormalizationConfig,
) -> Option<CorrectionReason> {
    CORRECTION_RULES
        .iter()
        .find(|(_, check)| check(record, config))
        .map(|(reason, _)| *reason)
}

/// Parses the attendance day and classifies a single record.
pub fn normalize_record(record: RawRecord, config: &NormalizationConfig) -> NormalizedRecord {
    let record_date = record.record_date.as_deref().and_then(parse_date);
    let correction = classify_record(&record, config);
    NormalizedRecord {
        raw: record,
        record_date,
        correction,
    }
}

/// Normalizes every record of an upload.
pub fn normalize_records(
    records: Vec<RawRecord>,
    config: &NormalizationConfig,
) -> Vec<NormalizedRecord> {
    let normalized: Vec<NormalizedRecord> = records
        .into_iter()
        .map(|record| normalize_record(record, config))
        .collect();

    let mut by_reason: HashMap<CorrectionReason, usize> = HashMap::new();
    for reason in normalized.iter().filter_map(|r| r.correction) {
        *by_reason.entry(reason).or_default() += 1;
    }
    let undated = normalized.iter().filter(|r| r.record_date.is_none()).count();

    info!(
        records = normalized.len(),
        missing_date = by_reason.get(&CorrectionReason::MissingDate).copied().unwrap_or(0),
        void_punch = by_reason.get(&CorrectionReason::VoidPunch).copied().unwrap_or(0),
        missing_or_sentinel_time = by_reason
            .get(&CorrectionReason::MissingOrSentinelTime)
            .copied()
            .unwrap_or(0),
        undated,
        "Records normalized"
    );

    normalized
}
