//! Filter selection models.
//!
//! These types carry what the presentation layer selected: one value or the
//! `"All"` wildcard per filterable dimension.

use serde::{Deserialize, Serialize};

use super::DimensionTags;

/// The literal the presentation layer uses for "no filtering".
pub const WILDCARD: &str = "All";

/// A single categorical equality filter.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DimensionFilter;
///
/// assert_eq!(DimensionFilter::from_selection(Some("All")), DimensionFilter::All);
/// assert_eq!(DimensionFilter::from_selection(None), DimensionFilter::All);
/// assert!(DimensionFilter::from_selection(Some("Finance")).matches(Some("Finance")));
/// assert!(!DimensionFilter::from_selection(Some("Finance")).matches(Some("finance")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum DimensionFilter {
    /// Wildcard; every record matches.
    #[default]
    All,
    /// Only records whose tag equals this value exactly.
    Only(String),
}

impl DimensionFilter {
    /// Interprets a selection, treating absence and `"All"` as the wildcard.
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection {
            None | Some(WILDCARD) => DimensionFilter::All,
            Some(value) => DimensionFilter::Only(value.to_string()),
        }
    }

    /// Returns true if a record carrying `tag` passes this filter.
    ///
    /// A missing tag never matches a concrete value.
    pub fn matches(&self, tag: Option<&str>) -> bool {
        match self {
            DimensionFilter::All => true,
            DimensionFilter::Only(value) => tag == Some(value.as_str()),
        }
    }

    /// Returns true for the wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, DimensionFilter::All)
    }
}

/// The three dimension filters, composed with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Filter on `dir_title`.
    pub directorate: DimensionFilter,
    /// Filter on `type_work_name`.
    pub work_type: DimensionFilter,
    /// Filter on `pos_grade`.
    pub position_grade: DimensionFilter,
}

impl RecordFilter {
    /// Returns true if `tags` pass every filter.
    pub fn matches(&self, tags: &DimensionTags) -> bool {
        self.directorate.matches(tags.directorate.as_deref())
            && self.work_type.matches(tags.work_type.as_deref())
            && self.position_grade.matches(tags.position_grade.as_deref())
    }
}

/// The selectable values per filterable dimension, wildcard first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// `"All"` followed by the sorted distinct directorates.
    pub directorates: Vec<String>,
    /// `"All"` followed by the sorted distinct work types.
    pub work_types: Vec<String>,
    /// `"All"` followed by the sorted distinct position grades.
    pub position_grades: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(directorate: &str, work_type: &str, grade: &str) -> DimensionTags {
        DimensionTags {
            directorate: Some(directorate.to_string()),
            work_type: Some(work_type.to_string()),
            position_grade: Some(grade.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let filter = RecordFilter::default();
        assert!(filter.matches(&tags("Ops", "Shift", "G1")));
        assert!(filter.matches(&DimensionTags::default()));
    }

    #[test]
    fn test_concrete_filters_compose_with_and() {
        let filter = RecordFilter {
            directorate: DimensionFilter::Only("Ops".to_string()),
            work_type: DimensionFilter::All,
            position_grade: DimensionFilter::Only("G1".to_string()),
        };
        assert!(filter.matches(&tags("Ops", "Shift", "G1")));
        assert!(!filter.matches(&tags("Ops", "Shift", "G2")));
        assert!(!filter.matches(&tags("Finance", "Shift", "G1")));
    }

    #[test]
    fn test_concrete_filter_rejects_missing_tag() {
        let filter = DimensionFilter::Only("Ops".to_string());
        assert!(!filter.matches(None));
    }

    #[test]
    fn test_filter_serialization() {
        let json = serde_json::to_string(&DimensionFilter::Only("Ops".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"only","value":"Ops"}"#);

        let json = serde_json::to_string(&DimensionFilter::All).unwrap();
        assert_eq!(json, r#"{"kind":"all"}"#);
    }
}
