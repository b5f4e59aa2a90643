//! The [`Queryable`] trait: field access for the query engine.

use crate::value::Value;

/// Trait for items the query engine can filter and sort.
///
/// [`Record`](crate::Record) implements it; screens with their own item
/// types can implement it by hand.
///
/// # Manual Implementation
///
/// ```
/// use pacer_seeker::{Queryable, RecordId, Value};
///
/// struct Runner {
///     id: RecordId,
///     name: String,
///     reg_date: String,
/// }
///
/// impl Queryable for Runner {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "id" => Value::Id(&self.id),
///             "author" | "name" => Value::String(&self.name),
///             "date" | "regDate" => Value::Date(&self.reg_date),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
///
/// The engine reads `id`, `date`, `views` and the screen's name field for
/// sorting, plus whatever fields the screen searches and filters on.
pub trait Queryable {
    /// Returns the value of a field, or [`Value::None`] if there is none.
    fn field_value(&self, field: &str) -> Value<'_>;
}

impl<T: Queryable + ?Sized> Queryable for &T {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}
