//! Runtime value types for field comparison.
//!
//! The [`Value`] enum represents the value of a field extracted from an item
//! at query time. It borrows from the item, so extracting a value never
//! allocates.

use crate::record::RecordId;

/// Runtime value for comparison, borrowed from the source item.
///
/// # Example
///
/// ```
/// use pacer_seeker::{Queryable, Record, Value};
///
/// let record = Record::new(1u64, "Spring half marathon").views(12);
/// assert_eq!(record.field_value("title"), Value::String("Spring half marathon"));
/// assert_eq!(record.field_value("views"), Value::Number(12));
/// assert_eq!(record.field_value("nope"), Value::None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Free text.
    String(&'a str),
    /// A `YYYY-MM-DD` or `YYYY.MM.DD` date string.
    Date(&'a str),
    /// A non-negative counter such as a view count.
    Number(u64),
    /// The record identifier.
    Id(&'a RecordId),
    /// Field not present or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the text of a `String` or `Date` value.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) | Value::Date(s) => Some(*s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Exact equality against a categorical filter value.
    ///
    /// Numbers and ids compare through their decimal text, so a `year`
    /// filter of `"2025"` matches whatever representation the field has.
    /// Missing fields never match.
    pub fn equals_text(&self, expected: &str) -> bool {
        match self {
            Value::String(s) | Value::Date(s) => *s == expected,
            Value::Number(n) => expected.parse::<u64>().is_ok_and(|e| e == *n),
            Value::Id(id) => id.to_string() == expected,
            Value::None => false,
        }
    }
}
