//! Lenient parsing of the export's date and time strings.
//!
//! Nothing here returns an error: a value that matches none of the accepted
//! layouts is simply `None`, which the normalizer and the working-hours
//! calculator turn into a correction or a null duration.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Accepted calendar date layouts, tried in order.
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Accepted time-of-day layouts, tried in order.
pub const TIME_FORMATS: [&str; 3] = ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Parses a calendar date.
///
/// A value carrying a time component (`2024-01-01 00:00:00`) yields its date.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date("2024-01-31"), NaiveDate::from_ymd_opt(2024, 1, 31));
/// assert_eq!(parse_date("2024-01-31 00:00:00"), NaiveDate::from_ymd_opt(2024, 1, 31));
/// assert_eq!(parse_date("not a date"), None);
/// ```
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| value.split_once([' ', 'T']).and_then(|(date, time)| {
            parse_time(time)?;
            parse_date(date)
        }))
}

/// Parses a time of day.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::parse_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time("08:30"), NaiveTime::from_hms_opt(8, 30, 0));
/// assert_eq!(parse_time("placeholder"), None);
/// ```
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}

/// Joins a date and a time string with a space and parses the result as one
/// instant.
///
/// Either part being unparseable makes the whole instant `None`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::parse_instant;
///
/// let instant = parse_instant("2024-01-01", "18:30:00").unwrap();
/// assert_eq!(instant.to_string(), "2024-01-01 18:30:00");
/// assert!(parse_instant("2024-01-01", "placeholder").is_none());
/// ```
pub fn parse_instant(date: &str, time: &str) -> Option<NaiveDateTime> {
    let joined = format!("{} {}", date.trim(), time.trim());

    DATE_FORMATS.iter().find_map(|date_format| {
        TIME_FORMATS.iter().find_map(|time_format| {
            NaiveDateTime::parse_from_str(&joined, &format!("{} {}", date_format, time_format))
                .ok()
        })
    })
}

/// Parses an optional date and time pair into an instant.
pub fn parse_optional_instant(date: Option<&str>, time: Option<&str>) -> Option<NaiveDateTime> {
    parse_instant(date?, time?)
}
