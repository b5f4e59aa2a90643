//! The [`Row`] view model.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::marker::{bare_title, display_title};
use crate::record::{Answer, Attachment, Record, RecordId};

/// One table line: a record, or the synthetic reply row of its answer.
///
/// Rows hold the bare title; [`Row::display_title`] adds the reply marker
/// for reply rows. `display_no` is filled in by
/// [`assign_display_numbers`](crate::assign_display_numbers) and stays
/// `None` on reply rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// The record id; reply rows carry their parent's id.
    pub id: RecordId,
    pub title: String,
    pub author: String,
    pub date: String,
    pub views: u64,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(rename = "__replyOf", skip_serializing_if = "Option::is_none")]
    pub reply_of: Option<RecordId>,
    #[serde(rename = "__isReply")]
    pub is_reply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_no: Option<usize>,
}

impl Row {
    /// The parent row for a record.
    pub fn parent(record: &Record) -> Row {
        Row {
            id: record.id.clone(),
            title: bare_title(&record.title).to_string(),
            author: record.author.clone(),
            date: record.date.clone(),
            views: record.views,
            content: record.content.clone(),
            attachments: record.attachments.clone(),
            attributes: record.attributes.clone(),
            reply_of: None,
            is_reply: false,
            display_no: None,
        }
    }

    /// The synthetic reply row for `answer` under `parent`.
    pub fn reply(parent: &Record, answer: &Answer) -> Row {
        Row {
            id: parent.id.clone(),
            title: bare_title(&parent.title).to_string(),
            author: answer.author.clone(),
            date: answer.date.clone(),
            views: 0,
            content: answer.content.clone(),
            attachments: answer.attachments.clone(),
            attributes: BTreeMap::new(),
            reply_of: Some(parent.id.clone()),
            is_reply: true,
            display_no: None,
        }
    }

    /// A key unique within one expanded list, e.g. `7` or `7:reply`.
    pub fn key(&self) -> String {
        if self.is_reply {
            format!("{}:reply", self.id)
        } else {
            self.id.to_string()
        }
    }

    /// The title as the table shows it.
    pub fn display_title(&self) -> String {
        display_title(&self.title, self.is_reply)
    }

    /// Returns `true` if this row is the reply of `parent`.
    pub fn replies_to(&self, parent: &Row) -> bool {
        self.is_reply && !parent.is_reply && self.reply_of.as_ref() == Some(&parent.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_row_strips_markers() {
        let record = Record::new(3u64, "[RE] [RE] Shuttle bus").author("kim");
        let row = Row::parent(&record);
        assert_eq!(row.title, "Shuttle bus");
        assert_eq!(row.display_title(), "Shuttle bus");
        assert!(!row.is_reply);
        assert_eq!(row.key(), "3");
    }

    #[test]
    fn reply_row_takes_answer_fields() {
        let answer = Answer::new("admin", "2025-05-02", "Every 10 minutes")
            .with_attachment(Attachment::new("timetable.pdf", "/files/1"));
        let record = Record::new(3u64, "[RE] Shuttle bus").author("kim").answer(answer);
        let parent = Row::parent(&record);
        let reply = Row::reply(&record, record.answer.as_ref().unwrap());

        assert_eq!(reply.title, "Shuttle bus");
        assert_eq!(reply.display_title(), "[RE] Shuttle bus");
        assert_eq!(reply.author, "admin");
        assert_eq!(reply.content, "Every 10 minutes");
        assert_eq!(reply.attachments.len(), 1);
        assert_eq!(reply.reply_of, Some(RecordId::Num(3)));
        assert!(reply.replies_to(&parent));
        assert!(!parent.replies_to(&reply));
        assert_eq!(reply.key(), "3:reply");
    }

    #[test]
    fn row_serializes_view_model_keys() {
        let record = Record::new(1u64, "Q").answer(Answer::new("a", "2025-01-01", "A"));
        let reply = Row::reply(&record, record.answer.as_ref().unwrap());
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["__replyOf"], 1);
        assert_eq!(json["__isReply"], true);
        assert!(json.get("displayNo").is_none());
    }
}
