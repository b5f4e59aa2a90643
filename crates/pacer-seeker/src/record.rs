//! Record types consumed by the engine.
//!
//! A [`Record`] is one notice, FAQ, inquiry, applicant, organization, user or
//! gallery entry as it arrives from the data source. The engine only ever
//! borrows records; rows built from them are separate values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::traits::Queryable;
use crate::value::Value;

/// Opaque, stable record identifier.
///
/// Numeric ids compare numerically, other ids lexicographically. Numeric ids
/// sort before textual ones, so mixed datasets still order deterministically.
///
/// Strings made only of ASCII digits are read as numeric ids, which keeps
/// `"12"` and `12` equal no matter how the source encoded them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric id.
    Num(u64),
    /// Any other id.
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Num(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Num(n) => RecordId::Num(n),
            RawId::Text(s) => RecordId::from(s),
        })
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Num(n)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        let numeric = !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        match s.parse::<u64>() {
            Ok(n) if numeric => RecordId::Num(n),
            _ => RecordId::Text(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::from(s.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Num(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// A file attached to a record or an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Attachment {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The answer nested under a question record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Answer {
    pub fn new(
        author: impl Into<String>,
        date: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Answer {
            content: content.into(),
            author: author.into(),
            date: date.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// A single list item as fetched from the data source.
///
/// `attributes` holds everything screen specific: categorical fields such as
/// `status`, `visibility`, `kind`, `year` or `memberType`, and extra text or
/// date fields such as `regDate`, `eventDate` or `organization`.
///
/// `answered` mirrors the source's status flag. It can be `true` while
/// `answer` is still `None` when the answer has not propagated yet; the
/// engine trusts `answer`, never the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Answer>,
    #[serde(default)]
    pub answered: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Num(0)
    }
}

impl Record {
    pub const ID: &'static str = "id";
    pub const TITLE: &'static str = "title";
    pub const AUTHOR: &'static str = "author";
    pub const DATE: &'static str = "date";
    pub const VIEWS: &'static str = "views";
    pub const CONTENT: &'static str = "content";

    /// Creates a record with the given id and title; everything else empty.
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            title: title.into(),
            ..Record::default()
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn views(mut self, views: u64) -> Self {
        self.views = views;
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Attaches an answer and sets the `answered` flag.
    pub fn answer(mut self, answer: Answer) -> Self {
        self.answer = Some(answer);
        self.answered = true;
        self
    }

    /// Sets the `answered` flag without an answer body.
    pub fn flagged_answered(mut self) -> Self {
        self.answered = true;
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

impl Queryable for Record {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            Record::ID => Value::Id(&self.id),
            Record::TITLE => Value::String(&self.title),
            Record::AUTHOR => Value::String(&self.author),
            Record::DATE => Value::Date(&self.date),
            Record::VIEWS => Value::Number(self.views),
            Record::CONTENT => Value::String(&self.content),
            other => match self.attributes.get(other) {
                Some(v) => Value::String(v),
                None => Value::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_ids_become_numbers() {
        assert_eq!(RecordId::from("12"), RecordId::Num(12));
        assert_eq!(RecordId::from("a-12"), RecordId::Text("a-12".into()));
        assert_eq!(RecordId::from(""), RecordId::Text(String::new()));
        assert_eq!(RecordId::from("+5"), RecordId::Text("+5".into()));
    }

    #[test]
    fn ids_order_numbers_first() {
        assert!(RecordId::Num(9) < RecordId::Num(10));
        assert!(RecordId::Num(999) < RecordId::Text("a".into()));
        assert!(RecordId::Text("a".into()) < RecordId::Text("b".into()));
    }

    #[test]
    fn record_deserializes_camel_case() {
        let json = r#"{
            "id": "7",
            "title": "Course map",
            "views": 3,
            "answered": true,
            "attributes": { "regDate": "2025-08-10", "status": "open" }
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, RecordId::Num(7));
        assert!(record.answered);
        assert!(record.answer.is_none());
        assert_eq!(record.field_value("regDate"), Value::String("2025-08-10"));
    }

    #[test]
    fn id_serializes_in_source_shape() {
        assert_eq!(serde_json::to_string(&RecordId::Num(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&RecordId::Text("x1".into())).unwrap(),
            "\"x1\""
        );
    }

    #[test]
    fn field_values() {
        let r = Record::new(1u64, "Hello").author("kim").date("2025.01.02").views(4);
        assert_eq!(r.field_value("id"), Value::Id(&RecordId::Num(1)));
        assert_eq!(r.field_value("title"), Value::String("Hello"));
        assert_eq!(r.field_value("date"), Value::Date("2025.01.02"));
        assert_eq!(r.field_value("views"), Value::Number(4));
        assert_eq!(r.field_value("missing"), Value::None);
    }
}
