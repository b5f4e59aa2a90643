//! Thread expansion: question records become question + answer rows.

use crate::record::Record;
use crate::row::Row;

/// Expands ordered records into rows, one reply row after every answered
/// parent.
///
/// A record without an `answer` yields exactly one row, even when its
/// `answered` flag is set; a record with one yields exactly two adjacent rows.
///
/// # Example
///
/// ```
/// use pacer_seeker::{expand, Answer, Record};
///
/// let records = vec![
///     Record::new(2u64, "Refund?").answer(Answer::new("admin", "2025-03-02", "Yes")),
///     Record::new(1u64, "Parking?"),
/// ];
/// let rows = expand(&records);
/// assert_eq!(rows.len(), 3);
/// assert!(rows[1].is_reply);
/// ```
pub fn expand<R: AsRef<Record>>(records: &[R]) -> Vec<Row> {
    let mut rows = Vec::with_capacity(records.len() * 2);
    for record in records {
        let record = record.as_ref();
        rows.push(Row::parent(record));
        if let Some(answer) = &record.answer {
            rows.push(Row::reply(record, answer));
        }
    }
    rows
}

/// One parent row per record, answers ignored. For screens without threads.
pub fn flatten<R: AsRef<Record>>(records: &[R]) -> Vec<Row> {
    records.iter().map(|r| Row::parent(r.as_ref())).collect()
}

/// Records flagged answered whose answer is missing.
///
/// These are eventual-consistency gaps in the source, surfaced so callers
/// can log them; expansion itself treats them as unanswered.
pub fn unanswered_but_flagged<R: AsRef<Record>>(records: &[R]) -> impl Iterator<Item = &Record> {
    records
        .iter()
        .map(|r| AsRef::<Record>::as_ref(r))
        .filter(|r| r.answered && r.answer.is_none())
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}
