//! The data-layer seam: [`RecordRepository`] and an in-memory implementation.
//!
//! Screens do not own their data. A repository hands the controller the
//! records for a query and applies mutations; the controller bumps its
//! revision after each mutation so the next render pulls fresh data.
//!
//! Most screens load the whole dataset and let the engine filter, sort and
//! slice it. A repository that already did that work on its side returns a
//! [`Fetched`] with `server_total` set; the controller then only expands
//! threads and numbers rows.

use std::sync::Arc;

use pacer_seeker::{Answer, FilterSpec, PageRequest, Record, RecordId};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;

/// What a controller asks its repository for.
///
/// Client-side repositories may ignore both fields and return everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub spec: FilterSpec,
    pub request: PageRequest,
}

/// Records returned by a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fetched {
    pub records: Vec<Record>,
    /// Set when the repository already filtered, sorted and sliced; holds
    /// the total across all pages.
    pub server_total: Option<usize>,
}

impl Fetched {
    /// The full dataset, for the engine to process.
    pub fn all(records: Vec<Record>) -> Self {
        Fetched {
            records,
            server_total: None,
        }
    }

    /// One page already cut by the server, with the overall total.
    pub fn server_page(records: Vec<Record>, total: usize) -> Self {
        Fetched {
            records,
            server_total: Some(total),
        }
    }

    pub fn is_server_paged(&self) -> bool {
        self.server_total.is_some()
    }
}

/// A change forwarded to the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    Create(Record),
    Update(Record),
    Delete { id: RecordId },
    /// Attach an answer to a question.
    Reply { id: RecordId, answer: Answer },
}

impl Mutation {
    pub fn delete(id: impl Into<RecordId>) -> Self {
        Mutation::Delete { id: id.into() }
    }

    pub fn reply(id: impl Into<RecordId>, answer: Answer) -> Self {
        Mutation::Reply {
            id: id.into(),
            answer,
        }
    }

    /// The record this mutation targets.
    pub fn id(&self) -> &RecordId {
        match self {
            Mutation::Create(record) | Mutation::Update(record) => &record.id,
            Mutation::Delete { id } | Mutation::Reply { id, .. } => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "create",
            Mutation::Update(_) => "update",
            Mutation::Delete { .. } => "delete",
            Mutation::Reply { .. } => "reply",
        }
    }

    /// Whether the screen jumps back to page 1 afterwards.
    ///
    /// New content shows up first, so create and reply go to the top.
    /// Delete and update keep the reader where they were.
    pub fn resets_page(&self) -> bool {
        matches!(self, Mutation::Create(_) | Mutation::Reply { .. })
    }
}

/// Source of records for one or more list screens.
pub trait RecordRepository {
    type Error: std::error::Error + 'static;

    /// Returns the records for `request`.
    fn fetch(&self, request: &FetchRequest) -> Result<Fetched, Self::Error>;

    /// Applies a mutation.
    fn apply(&self, mutation: Mutation) -> Result<(), Self::Error>;
}

impl<R: RecordRepository + ?Sized> RecordRepository for &R {
    type Error = R::Error;

    fn fetch(&self, request: &FetchRequest) -> Result<Fetched, Self::Error> {
        (**self).fetch(request)
    }

    fn apply(&self, mutation: Mutation) -> Result<(), Self::Error> {
        (**self).apply(mutation)
    }
}

impl<R: RecordRepository + ?Sized> RecordRepository for Arc<R> {
    type Error = R::Error;

    fn fetch(&self, request: &FetchRequest) -> Result<Fetched, Self::Error> {
        (**self).fetch(request)
    }

    fn apply(&self, mutation: Mutation) -> Result<(), Self::Error> {
        (**self).apply(mutation)
    }
}

/// A repository over a vector of records.
///
/// Returns the full dataset on every fetch, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: RwLock<Vec<Record>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        InMemoryRepository {
            records: RwLock::new(records.into_iter().collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.records.read().iter().find(|r| &r.id == id).cloned()
    }

    /// A copy of every record.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.read().clone()
    }

    fn position(records: &[Record], id: &RecordId) -> Result<usize, RepositoryError> {
        records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }
}

impl RecordRepository for InMemoryRepository {
    type Error = RepositoryError;

    fn fetch(&self, _request: &FetchRequest) -> Result<Fetched, Self::Error> {
        Ok(Fetched::all(self.snapshot()))
    }

    fn apply(&self, mutation: Mutation) -> Result<(), Self::Error> {
        let mut records = self.records.write();
        match mutation {
            Mutation::Create(record) => {
                if records.iter().any(|r| r.id == record.id) {
                    return Err(RepositoryError::Duplicate(record.id));
                }
                records.push(record);
            }
            Mutation::Update(record) => {
                let index = Self::position(&records, &record.id)?;
                records[index] = record;
            }
            Mutation::Delete { id } => {
                let index = Self::position(&records, &id)?;
                records.remove(index);
            }
            Mutation::Reply { id, answer } => {
                let index = Self::position(&records, &id)?;
                let record = &mut records[index];
                record.answer = Some(answer);
                record.answered = true;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryRepository {
        InMemoryRepository::with_records(vec![
            Record::new(1u64, "Bib pickup?"),
            Record::new(2u64, "Refund?"),
        ])
    }

    fn fetch_all(repo: &InMemoryRepository) -> Vec<Record> {
        let request = FetchRequest {
            spec: FilterSpec::new(),
            request: PageRequest::default(),
        };
        repo.fetch(&request).unwrap().records
    }

    #[test]
    fn fetch_returns_everything_unpaged() {
        let fetched = store()
            .fetch(&FetchRequest {
                spec: FilterSpec::new().query("nothing matches"),
                request: PageRequest::new(9, 1),
            })
            .unwrap();
        assert_eq!(fetched.records.len(), 2);
        assert!(!fetched.is_server_paged());
    }

    #[test]
    fn create_rejects_duplicates() {
        let repo = store();
        repo.apply(Mutation::Create(Record::new(3u64, "Parking?")))
            .unwrap();
        assert_eq!(repo.len(), 3);

        let err = repo
            .apply(Mutation::Create(Record::new(3u64, "Again")))
            .unwrap_err();
        assert_eq!(err, RepositoryError::Duplicate(RecordId::Num(3)));
    }

    #[test]
    fn delete_missing_is_not_found() {
        let repo = store();
        repo.apply(Mutation::delete(1u64)).unwrap();
        assert_eq!(fetch_all(&repo).len(), 1);

        let err = repo.apply(Mutation::delete(1u64)).unwrap_err();
        assert_eq!(err.to_string(), "record 1 not found");
    }

    #[test]
    fn reply_attaches_answer_and_flag() {
        let repo = store();
        repo.apply(Mutation::reply(
            2u64,
            Answer::new("admin", "2025-03-03", "Until March 10."),
        ))
        .unwrap();
        let record = repo.get(&RecordId::Num(2)).unwrap();
        assert!(record.answered);
        assert_eq!(record.answer.unwrap().content, "Until March 10.");
    }

    #[test]
    fn update_replaces_in_place() {
        let repo = store();
        repo.apply(Mutation::Update(Record::new(1u64, "Bib pickup hours?").views(4)))
            .unwrap();
        let records = fetch_all(&repo);
        assert_eq!(records[0].title, "Bib pickup hours?");
        assert_eq!(records[0].views, 4);
    }

    #[test]
    fn mutation_page_policy() {
        assert!(Mutation::Create(Record::new(1u64, "x")).resets_page());
        assert!(Mutation::reply(1u64, Answer::new("a", "d", "c")).resets_page());
        assert!(!Mutation::delete(1u64).resets_page());
        assert!(!Mutation::Update(Record::new(1u64, "x")).resets_page());
    }

    #[test]
    fn mutation_serde_is_tagged() {
        let json = serde_json::to_value(Mutation::delete(7u64)).unwrap();
        assert_eq!(json, serde_json::json!({"op": "delete", "id": 7}));
    }

    #[test]
    fn shared_store_through_arc() {
        let shared = Arc::new(store());
        let other = Arc::clone(&shared);
        other.apply(Mutation::delete(2u64)).unwrap();
        let fetched = shared
            .fetch(&FetchRequest {
                spec: FilterSpec::new(),
                request: PageRequest::default(),
            })
            .unwrap();
        assert_eq!(fetched.records.len(), 1);
    }
}
