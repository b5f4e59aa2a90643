//! The declarative query state: [`FilterSpec`] and its typed parts.
//!
//! A `FilterSpec` describes what a list screen currently asks for. It has no
//! behavior of its own; [`crate::filter`] executes it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SeekerError};

/// Sort order of a list screen.
///
/// Deserializing is lenient: an unknown key becomes [`SortKey::New`], so a
/// stored spec with a retired sort still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest first: date descending, then id descending.
    #[default]
    New,
    /// Oldest first: date ascending, then id ascending.
    Old,
    /// Most viewed first; equal view counts keep their prior order.
    Hit,
    /// Name ascending, then date descending.
    Name,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::New, SortKey::Old, SortKey::Hit, SortKey::Name];

    /// Parses a sort key, falling back to [`SortKey::New`] for anything
    /// unknown. Stale or hand-edited query strings land here.
    pub fn parse_lenient(s: &str) -> SortKey {
        s.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::New => "new",
            SortKey::Old => "old",
            SortKey::Hit => "hit",
            SortKey::Name => "name",
        }
    }
}

impl FromStr for SortKey {
    type Err = SeekerError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| SeekerError::UnknownSort(key.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SortKey::parse_lenient(&raw))
    }
}

/// Which field the free-text query is matched against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SearchField {
    /// The title, with leading reply markers ignored.
    #[default]
    Title,
    /// The author or applicant name.
    Author,
    /// The body text.
    Content,
    /// Any of the screen's searchable text fields.
    All,
    /// A named attribute such as `organization` or `phone`.
    Field(String),
}

impl SearchField {
    pub fn as_str(&self) -> &str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Content => "content",
            SearchField::All => "all",
            SearchField::Field(name) => name,
        }
    }
}

impl FromStr for SearchField {
    type Err = SeekerError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim() {
            "" => return Err(SeekerError::EmptySearchField),
            "title" => SearchField::Title,
            "author" => SearchField::Author,
            "content" => SearchField::Content,
            "all" => SearchField::All,
            other => SearchField::Field(other.to_string()),
        })
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SearchField {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SearchField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The active query of a list screen.
///
/// An empty `query` and an absent or empty filter value both mean "no
/// constraint". A default spec matches everything, newest first.
///
/// # Example
///
/// ```
/// use pacer_seeker::{FilterSpec, SearchField, SortKey};
///
/// let spec = FilterSpec::new()
///     .query("course")
///     .search_in(SearchField::All)
///     .sort(SortKey::Hit)
///     .filter("status", "open");
///
/// assert_eq!(spec.filters.get("status").map(String::as_str), Some("open"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub query: String,
    pub search_field: SearchField,
    pub sort: SortKey,
    pub filters: BTreeMap<String, String>,
}

impl FilterSpec {
    /// Creates an unconstrained spec.
    pub fn new() -> Self {
        FilterSpec::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn search_in(mut self, field: SearchField) -> Self {
        self.search_field = field;
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Sets a categorical filter. An empty value removes the filter.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filter(key, value);
        self
    }

    /// In-place form of [`FilterSpec::filter`].
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value);
        }
    }

    /// The query with surrounding whitespace removed.
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    /// Returns `true` if the spec filters nothing out.
    pub fn is_unconstrained(&self) -> bool {
        self.trimmed_query().is_empty() && self.active_filters().next().is_none()
    }

    /// Categorical filters that actually constrain, with values trimmed
    /// and empty ones skipped.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .map(|(k, v)| (k.as_str(), v.trim()))
            .filter(|(_, v)| !v.is_empty())
    }

    /// Human-readable summary, e.g. `title contains 'course', status=open`.
    pub fn summary(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.trimmed_query().is_empty() {
            parts.push(format!(
                "{} contains '{}'",
                self.search_field,
                self.trimmed_query()
            ));
        }
        parts.extend(self.active_filters().map(|(k, v)| format!("{k}={v}")));
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}
