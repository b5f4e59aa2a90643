//! Pacer - list screens for the marathon association site.
//!
//! Notices, FAQs, inquiries, applicants, member organizations, individual
//! members and galleries are all the same screen underneath: a table with a
//! search box, a few filters, a sort selector and pagination. Pacer runs
//! that screen once, configured per use:
//!
//! - [`ScreenConfig`]: page size, threading, searchable fields, sorts and
//!   filters for one screen, from presets, YAML or JSON
//! - [`RecordRepository`]: where records come from and where mutations go
//! - [`ListController`]: holds the query state, reacts to search, filter,
//!   sort, page and mutation triggers, and memoizes the current page
//! - [`PageView`]: the serializable result for the table and pagination
//!   components
//!
//! Filtering, sorting, thread expansion and numbering live in
//! [`pacer_seeker`], re-exported here.
//!
//! # Quick Start
//!
//! ```rust
//! use pacer::{
//!     Answer, InMemoryRepository, ListController, Mutation, Record, ScreenConfig, SearchField,
//! };
//!
//! let repo = InMemoryRepository::with_records(vec![
//!     Record::new(1u64, "Bib pickup?").author("kim").date("2025-03-01"),
//!     Record::new(2u64, "Refund?").author("lee").date("2025-03-02"),
//! ]);
//! let mut inquiries = ListController::new(ScreenConfig::preset("inquiries")?, repo)?;
//!
//! inquiries.mutate(Mutation::reply(2u64, Answer::new("admin", "2025-03-03", "Until March 10.")))?;
//! inquiries.search("refund", SearchField::Title);
//!
//! let view = inquiries.view()?;
//! assert_eq!(view.pagination.total, 1);
//! assert_eq!(view.rows.len(), 2);
//! assert_eq!(view.rows[1].display_title, "[RE] Refund?");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Logging
//!
//! Pacer emits `tracing` events and installs no subscriber. Recomputations,
//! memo hits and dropped query parameters log at `debug`, mutations at
//! `info`, page clamps and answered records without an answer at `warn`.

mod config;
mod controller;
mod error;
mod message;
mod repository;
mod view;

pub use config::{load_screens, ScreenConfig, ScreenParams};
pub use controller::ListController;
pub use error::{ConfigError, ListError, RepositoryError};
pub use message::{Message, MessageLevel};
pub use repository::{FetchRequest, Fetched, InMemoryRepository, Mutation, RecordRepository};
pub use view::{page_view, PageView, PageViewBuilder, Pagination, RowView, PAGE_BLOCK};

pub use pacer_seeker::{
    Answer, Attachment, Basis, FilterSpec, PageRequest, PageResult, QueryEngine, Record,
    RecordId, Row, SearchField, SearchProfile, Slicing, SortKey,
};
