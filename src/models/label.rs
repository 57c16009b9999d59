//! Ordering of dimension labels.
//!
//! Exports often carry purely numeric codes in a text column (position
//! grades `1`, `2`, `10`). When every label of a set is a number the set is
//! ordered numerically, otherwise lexically. A single non-numeric label puts
//! the whole set back in lexical order.

use std::str::FromStr;

use rust_decimal::Decimal;

fn numeric(label: &str) -> Option<Decimal> {
    Decimal::from_str(label).ok()
}

/// Sorts `items` by the label `label_of` selects, using the set rule above.
///
/// # Example
///
/// ```
/// use attendance_engine::models::sort_labels;
///
/// let mut grades = vec!["10", "2", "1"];
/// sort_labels(&mut grades, |g| *g);
/// assert_eq!(grades, vec!["1", "2", "10"]);
///
/// let mut grades = vec!["G10", "G2", "G1"];
/// sort_labels(&mut grades, |g| *g);
/// assert_eq!(grades, vec!["G1", "G10", "G2"]);
/// ```
pub fn sort_labels<T, F>(items: &mut [T], label_of: F)
where
    F: Fn(&T) -> &str,
{
    let all_numeric = items.iter().all(|item| numeric(label_of(item)).is_some());
    if all_numeric {
        items.sort_by(|a, b| {
            let (a, b) = (label_of(a), label_of(b));
            numeric(a).cmp(&numeric(b)).then_with(|| a.cmp(b))
        });
    } else {
        items.sort_by(|a, b| label_of(a).cmp(label_of(b)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(labels: &[&str]) -> Vec<String> {
        let mut labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        sort_labels(&mut labels, |l| l.as_str());
        labels
    }

    #[test]
    fn test_numeric_labels_sort_numerically() {
        assert_eq!(sorted(&["10", "2", "1", "03"]), vec!["1", "2", "03", "10"]);
    }

    #[test]
    fn test_text_labels_sort_lexically() {
        assert_eq!(sorted(&["G2", "G10", "G1"]), vec!["G1", "G10", "G2"]);
    }

    #[test]
    fn test_one_text_label_makes_the_set_lexical() {
        assert_eq!(sorted(&["10", "2", "N/A"]), vec!["10", "2", "N/A"]);
    }

    #[test]
    fn test_equal_numbers_tie_break_on_text() {
        assert_eq!(sorted(&["1.0", "1"]), vec!["1", "1.0"]);
    }
}
