//! Query execution: predicate filtering followed by a stable sort.
//!
//! [`QueryEngine`] runs a [`FilterSpec`] against a slice of items. The
//! engine is configured with a [`SearchProfile`] describing which fields a
//! screen searches, which fields hold dates, and which field names sort by.
//!
//! The match logic is:
//!
//! ```text
//! match = (query is empty OR query matches)
//!       ∧ (every active categorical filter equals the item's field)
//! ```
//!
//! A query matches in one of two modes. If it looks like a date (`2025`,
//! `2025-08`, `2025.08.10`, ...) and the screen has date fields, it matches
//! items whose date fields start with it. Otherwise it is a case-insensitive
//! substring search over the selected text fields.

use crate::date::{date_has_prefix, date_prefix};
use crate::marker::bare_title;
use crate::ordering::{compare_by_orderings, orderings_for};
use crate::record::Record;
use crate::spec::{FilterSpec, SearchField};
use crate::traits::Queryable;

/// Per-screen description of searchable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProfile {
    /// Fields searched when the spec selects [`SearchField::All`].
    pub text_fields: Vec<String>,
    /// Fields a date-shaped query is matched against. Empty disables the
    /// date heuristic.
    pub date_fields: Vec<String>,
    /// Field the `name` sort orders by.
    pub name_field: String,
}

impl Default for SearchProfile {
    fn default() -> Self {
        SearchProfile {
            text_fields: vec![
                Record::TITLE.to_string(),
                Record::AUTHOR.to_string(),
                Record::CONTENT.to_string(),
            ],
            date_fields: Vec::new(),
            name_field: Record::AUTHOR.to_string(),
        }
    }
}

impl SearchProfile {
    pub fn text_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn date_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn name_field(mut self, field: impl Into<String>) -> Self {
        self.name_field = field.into();
        self
    }
}

/// How the free-text query of a spec is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    /// No query: everything passes.
    Any,
    /// Case-insensitive substring; holds the lowercased needle.
    Text(String),
    /// Date prefix in `-` form.
    DatePrefix(String),
}

impl QueryMode {
    /// Decides how `query` is matched on a screen with `profile`.
    pub fn classify(query: &str, profile: &SearchProfile) -> QueryMode {
        let query = query.trim();
        if query.is_empty() {
            return QueryMode::Any;
        }
        if !profile.date_fields.is_empty() {
            if let Some(prefix) = date_prefix(query) {
                return QueryMode::DatePrefix(prefix);
            }
        }
        QueryMode::Text(query.to_lowercase())
    }
}

/// Filters and orders items according to a [`FilterSpec`].
///
/// # Example
///
/// ```
/// use pacer_seeker::{FilterSpec, QueryEngine, Record, RecordId, SortKey};
///
/// let records = vec![
///     Record::new(5u64, "a").date("2025-01-03").views(10),
///     Record::new(3u64, "b").date("2025-01-05").views(2),
///     Record::new(9u64, "c").date("2025-01-05").views(2),
/// ];
///
/// let engine = QueryEngine::default();
/// let ordered = engine.filter(&records, &FilterSpec::new().sort(SortKey::New));
/// let ids: Vec<_> = ordered.iter().map(|r| r.id.clone()).collect();
/// assert_eq!(ids, vec![RecordId::Num(9), RecordId::Num(3), RecordId::Num(5)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    profile: SearchProfile,
}

impl QueryEngine {
    pub fn new(profile: SearchProfile) -> Self {
        QueryEngine { profile }
    }

    pub fn profile(&self) -> &SearchProfile {
        &self.profile
    }

    /// Tests if a single item matches the spec's predicates.
    pub fn matches<T: Queryable>(&self, item: &T, spec: &FilterSpec) -> bool {
        let mode = QueryMode::classify(&spec.query, &self.profile);
        self.matches_mode(item, spec, &mode)
    }

    fn matches_mode<T: Queryable>(&self, item: &T, spec: &FilterSpec, mode: &QueryMode) -> bool {
        let query_pass = match mode {
            QueryMode::Any => true,
            QueryMode::DatePrefix(prefix) => self.profile.date_fields.iter().any(|field| {
                item.field_value(field)
                    .as_str()
                    .is_some_and(|date| date_has_prefix(date, prefix))
            }),
            QueryMode::Text(needle) => self.text_matches(item, &spec.search_field, needle),
        };

        query_pass
            && spec
                .active_filters()
                .all(|(key, value)| item.field_value(key).equals_text(value))
    }

    fn text_matches<T: Queryable>(&self, item: &T, field: &SearchField, needle: &str) -> bool {
        let contains = |name: &str| {
            item.field_value(name).as_str().is_some_and(|text| {
                let text = if name == Record::TITLE {
                    bare_title(text)
                } else {
                    text
                };
                text.to_lowercase().contains(needle)
            })
        };

        match field {
            SearchField::Title => contains(Record::TITLE),
            SearchField::Author => contains(Record::AUTHOR),
            SearchField::Content => contains(Record::CONTENT),
            SearchField::Field(name) => contains(name.as_str()),
            SearchField::All => self.profile.text_fields.iter().any(|f| contains(f.as_str())),
        }
    }

    /// Filters a slice, returning references to matching items in sort order.
    ///
    /// The sort is stable: items equal under the spec's comparator keep
    /// their input order.
    pub fn filter<'a, T: Queryable>(&self, items: &'a [T], spec: &FilterSpec) -> Vec<&'a T> {
        let mode = QueryMode::classify(&spec.query, &self.profile);
        let mut results: Vec<&'a T> = items
            .iter()
            .filter(|item| self.matches_mode(*item, spec, &mode))
            .collect();

        let orderings = orderings_for(spec.sort, &self.profile.name_field);
        results.sort_by(|a, b| compare_by_orderings(*a, *b, &orderings));
        results
    }

    /// Filters and clones matching items.
    pub fn filter_cloned<T: Queryable + Clone>(&self, items: &[T], spec: &FilterSpec) -> Vec<T> {
        self.filter(items, spec).into_iter().cloned().collect()
    }

    /// Counts the number of matching items.
    pub fn count<T: Queryable>(&self, items: &[T], spec: &FilterSpec) -> usize {
        let mode = QueryMode::classify(&spec.query, &self.profile);
        items
            .iter()
            .filter(|item| self.matches_mode(*item, spec, &mode))
            .count()
    }
}

/// Runs `spec` with the default [`SearchProfile`].
pub fn filter<'a, T: Queryable>(items: &'a [T], spec: &FilterSpec) -> Vec<&'a T> {
    QueryEngine::default().filter(items, spec)
}
