//! Ordering types for result sorting.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for field-based
//! ordering. [`SortKey`] values are translated into `OrderBy` lists by
//! [`orderings_for`].

use std::cmp::Ordering;

use crate::date::compare_dates;
use crate::record::Record;
use crate::spec::SortKey;
use crate::traits::Queryable;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How two strings compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Collation {
    /// Plain code-point order.
    #[default]
    Binary,
    /// Case-folded order, falling back to code-point order on ties.
    ///
    /// Hangul syllables are encoded in dictionary order, so this sorts Korean
    /// names the way a Korean locale does.
    Folded,
}

impl Collation {
    fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Collation::Binary => a.cmp(b),
            Collation::Folded => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
                .then_with(|| a.cmp(b)),
        }
    }
}

/// A single ordering clause specifying a field and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub dir: Dir,
    pub collation: Collation,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
            collation: Collation::Binary,
        }
    }

    /// Switches string comparison to [`Collation::Folded`].
    pub fn folded(mut self) -> Self {
        self.collation = Collation::Folded;
        self
    }

    /// Compares two values according to this ordering.
    ///
    /// Missing values sort last in either direction. Returns `None` if the
    /// values cannot be compared (type mismatch).
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        match (a, b) {
            (Value::None, Value::None) => Some(Ordering::Equal),
            (Value::None, _) => Some(Ordering::Greater),
            (_, Value::None) => Some(Ordering::Less),
            _ => compare_values(a, b, self.collation).map(|o| self.dir.apply(o)),
        }
    }
}

/// Compares two values of the same kind.
///
/// Returns `None` if the kinds differ.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>, collation: Collation) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(collation.compare(a, b)),
        (Value::Date(a), Value::Date(b)) => Some(compare_dates(a, b)),
        (Value::Number(a), Value::Number(b)) => Some(a.cmp(b)),
        (Value::Id(a), Value::Id(b)) => Some(a.cmp(b)),
        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),
        _ => None,
    }
}

/// Compares two items using a list of ordering clauses.
///
/// The first clause is the primary key, the second breaks its ties, and so
/// on. Items equal under every clause compare `Equal`, which a stable sort
/// turns into "keep the prior order".
pub fn compare_by_orderings<T: Queryable>(a: &T, b: &T, orderings: &[OrderBy]) -> Ordering {
    for order_by in orderings {
        let val_a = a.field_value(&order_by.field);
        let val_b = b.field_value(&order_by.field);

        if let Some(ordering) = order_by.compare(&val_a, &val_b) {
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        // Incomparable values count as a tie for this clause.
    }
    Ordering::Equal
}

/// The comparator for a sort key.
///
/// `name_field` is the field the screen sorts names by, usually `author`
/// but `title` on screens such as galleries.
pub fn orderings_for(sort: SortKey, name_field: &str) -> Vec<OrderBy> {
    match sort {
        SortKey::New => vec![OrderBy::desc(Record::DATE), OrderBy::desc(Record::ID)],
        SortKey::Old => vec![OrderBy::asc(Record::DATE), OrderBy::asc(Record::ID)],
        SortKey::Hit => vec![OrderBy::desc(Record::VIEWS)],
        SortKey::Name => vec![OrderBy::asc(name_field).folded(), OrderBy::desc(Record::DATE)],
    }
}
