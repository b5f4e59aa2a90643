//! Date string handling.
//!
//! Dates arrive as `YYYY-MM-DD` or `YYYY.MM.DD`. Once `.` is mapped to `-`
//! they order correctly as plain strings, so nothing here parses a calendar.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

static DATE_QUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}(?:-[0-9]{2}(?:-[0-9]{2})?)?$").expect("date query pattern is valid")
});

fn unify(c: char) -> char {
    if c == '.' {
        '-'
    } else {
        c
    }
}

/// Maps every `.` separator to `-`.
pub fn normalize_date(date: &str) -> String {
    date.chars().map(unify).collect()
}

/// Compares two date strings as if both used `-` separators.
pub fn compare_dates(a: &str, b: &str) -> Ordering {
    a.chars().map(unify).cmp(b.chars().map(unify))
}

/// Returns `true` if `date`, normalized, starts with the normalized `prefix`.
pub fn date_has_prefix(date: &str, prefix: &str) -> bool {
    let mut date = date.chars().map(unify);
    prefix.chars().map(unify).all(|p| date.next() == Some(p))
}

/// Interprets a search query as a date prefix.
///
/// `2025`, `2025-08`, `2025.08`, `2025-08-10` and `2025.08.10` qualify and are
/// returned in `-` form. Anything else is `None` and should be searched as
/// text.
pub fn date_prefix(query: &str) -> Option<String> {
    let normalized = normalize_date(query.trim());
    DATE_QUERY.is_match(&normalized).then_some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_prefix_shapes() {
        assert_eq!(date_prefix("2025"), Some("2025".into()));
        assert_eq!(date_prefix(" 2025.08 "), Some("2025-08".into()));
        assert_eq!(date_prefix("2025-08-10"), Some("2025-08-10".into()));
        assert_eq!(date_prefix("2025.08.10"), Some("2025-08-10".into()));
        assert_eq!(date_prefix("2025-8"), None);
        assert_eq!(date_prefix("20251"), None);
        assert_eq!(date_prefix("2025-08-10-1"), None);
        assert_eq!(date_prefix("seoul 2025"), None);
        assert_eq!(date_prefix(""), None);
    }

    #[test]
    fn compare_ignores_separator_style() {
        assert_eq!(compare_dates("2025.01.05", "2025-01-05"), Ordering::Equal);
        assert_eq!(compare_dates("2025.01.03", "2025-01-05"), Ordering::Less);
        assert_eq!(compare_dates("2025-02-01", "2025.01.31"), Ordering::Greater);
    }

    #[test]
    fn prefix_match_normalizes_both_sides() {
        assert!(date_has_prefix("2025-08-10", "2025-08"));
        assert!(date_has_prefix("2025.08.10", "2025-08"));
        assert!(date_has_prefix("2025-08-10", "2025.08.10"));
        assert!(!date_has_prefix("2025-09-10", "2025-08"));
        assert!(!date_has_prefix("2025", "2025-08"));
        assert!(date_has_prefix("anything", ""));
    }
}
