//! Attendance record models.
//!
//! A record moves through three shapes, one per pipeline stage:
//! [`RawRecord`] as read from the CSV, [`NormalizedRecord`] once the
//! correction rules have been applied, and [`AttendanceRecord`] once worked
//! hours and punch instants have been derived.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Organizational tags attached to a record. Each may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionTags {
    /// Directorate (`dir_title`).
    pub directorate: Option<String>,
    /// Type of work (`type_work_name`).
    pub work_type: Option<String>,
    /// Position grade (`pos_grade`).
    pub position_grade: Option<String>,
    /// Compartment (`komp_title`).
    pub compartment: Option<String>,
    /// Job category (`kategori_jabatan`).
    pub job_category: Option<String>,
    /// Generation (`generasi`).
    pub generation: Option<String>,
    /// Work-description label (`jk_keterangan_name`).
    pub work_description: Option<String>,
}

/// One row of the attendance export with every field as read.
///
/// Values are trimmed and blank cells are `None`; nothing is parsed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Employee identifier. Not unique across rows; `None` when blank.
    pub employee_id: Option<String>,
    /// Attendance day (`tanggal`).
    pub record_date: Option<String>,
    /// Check-in date (`checkin_date_get`).
    pub checkin_date: Option<String>,
    /// Check-in time (`checkin_time_get`).
    pub checkin_time: Option<String>,
    /// Checkout date (`checkout_date_get`).
    pub checkout_date: Option<String>,
    /// Checkout time (`checkout_time_get`).
    pub checkout_time: Option<String>,
    /// Organizational tags.
    pub tags: DimensionTags,
}

/// Why a record cannot be used for hours computation.
///
/// Variants are listed in rule evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionReason {
    /// Check-in or checkout date is missing or unparseable.
    MissingDate,
    /// Checkout carries the sentinel time on the void-punch date.
    VoidPunch,
    /// Check-in or checkout time is missing or equals the sentinel time.
    MissingOrSentinelTime,
}

impl std::fmt::Display for CorrectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectionReason::MissingDate => write!(f, "missing or unparseable punch date"),
            CorrectionReason::VoidPunch => write!(f, "void punch"),
            CorrectionReason::MissingOrSentinelTime => {
                write!(f, "missing or sentinel punch time")
            }
        }
    }
}

/// A raw record after correction classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// The record as read.
    pub raw: RawRecord,
    /// Parsed attendance day; `None` when unparseable.
    pub record_date: Option<NaiveDate>,
    /// Set when the record needs correction.
    pub correction: Option<CorrectionReason>,
}

/// A fully derived attendance record, ready for filtering and aggregation.
///
/// `worked_hours` is never `Some` when `correction` is `Some`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Employee identifier; `None` when the export left it blank.
    ///
    /// Records without one still count toward the per-record metrics but
    /// belong to no employee-day.
    pub employee_id: Option<String>,
    /// Attendance day; `None` when unparseable.
    pub record_date: Option<NaiveDate>,
    /// Organizational tags.
    pub tags: DimensionTags,
    /// Set when the record needs correction.
    pub correction: Option<CorrectionReason>,
    /// Elapsed hours between check-in and checkout.
    pub worked_hours: Option<Decimal>,
    /// Combined check-in date and time, derived for every record.
    pub checkin_instant: Option<NaiveDateTime>,
    /// Combined checkout date and time, derived for every record.
    pub checkout_instant: Option<NaiveDateTime>,
}

impl AttendanceRecord {
    /// Returns true when the record was classified as structurally invalid.
    pub fn is_flagged(&self) -> bool {
        self.correction.is_some()
    }

    /// Returns true when the record should be surfaced for correction.
    ///
    /// This covers flagged records and unflagged records whose duration
    /// could not be computed.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceRecord, DimensionTags};
    ///
    /// let record = AttendanceRecord {
    ///     employee_id: Some("E1".to_string()),
    ///     record_date: None,
    ///     tags: DimensionTags::default(),
    ///     correction: None,
    ///     worked_hours: None,
    ///     checkin_instant: None,
    ///     checkout_instant: None,
    /// };
    /// assert!(record.needs_correction());
    /// assert!(!record.is_flagged());
    /// ```
    pub fn needs_correction(&self) -> bool {
        self.worked_hours.is_none() || self.correction.is_some()
    }

    /// Returns 1 when worked hours reach `threshold`, 0 otherwise (including null hours).
    pub fn overtime_flag(&self, threshold: Decimal) -> u8 {
        match self.worked_hours {
            Some(hours) if hours >= threshold => 1,
            _ => 0,
        }
    }

    /// Returns true when worked hours are known and below `threshold`.
    pub fn is_under(&self, threshold: Decimal) -> bool {
        self.worked_hours.is_some_and(|hours| hours < threshold)
    }
}
