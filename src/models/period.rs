//! Date range and calendar month models.
//!
//! This module contains the [`DateRange`] used by the filter engine and the
//! [`YearMonth`] key used by every monthly series.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An inclusive range of calendar days.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange {
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
/// };
///
/// assert!(range.contains_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())); // start date
/// assert!(range.contains_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())); // end date
/// assert!(!range.contains_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())); // after
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range from its two bounds.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// A single-day range.
    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// The range spanning the earliest and latest of `dates`.
    ///
    /// When `dates` is empty the range collapses to `today..today`. That
    /// fallback only keeps a dataset without a single parseable attendance
    /// date from failing; it is not a meaningful selection and will normally
    /// match nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    /// let range = DateRange::spanning(std::iter::empty(), today);
    /// assert_eq!(range, DateRange::single_day(today));
    /// ```
    pub fn spanning<I>(dates: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(date), max.max(date)),
                None => (date, date),
            });
        }

        match bounds {
            Some((min, max)) => Self::new(min, max),
            None => Self::single_day(today),
        }
    }

    /// Checks whether `date` falls within the range, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// A calendar month, ordered chronologically and written as `YYYY-MM`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::YearMonth;
/// use chrono::NaiveDate;
///
/// let month = YearMonth::of(NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
/// assert_eq!(month.to_string(), "2024-03");
/// assert!(month < YearMonth::new(2024, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month key. `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got '{}'", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in '{}'", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("invalid month in '{}'", s))?;
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range in '{}'", s));
        }
        Ok(Self::new(year, month))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
