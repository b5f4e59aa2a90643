//! Seeker - filter, sort, thread and paginate engine for list screens.
//!
//! Every list screen of the association site (notices, FAQs, inquiries,
//! applicants, organizations, individual members, galleries) runs the same
//! pipeline over an already-fetched dataset:
//!
//! ```text
//! records ──QueryEngine──▶ ordered records ──expand/flatten──▶ rows
//!         ──paginate──▶ page rows ──assign_display_numbers──▶ numbered page
//! ```
//!
//! - **Filtering**: case-insensitive text search, date-prefix search for
//!   date-shaped queries, exact categorical filters
//! - **Sorting**: `new`, `old`, `hit`, `name`, all stable and deterministic
//! - **Thread expansion**: answered questions become two adjacent rows
//! - **Pagination**: clamped page requests, caller-chosen basis totals, and
//!   descending display numbers that skip reply rows
//!
//! Every function is pure. Inputs are borrowed and never modified, and no
//! input makes the pipeline fail.
//!
//! # Quick Start
//!
//! ```rust
//! use pacer_seeker::{
//!     expand, page_rows, Answer, Basis, FilterSpec, PageRequest, QueryEngine, Record,
//!     Slicing, SortKey,
//! };
//!
//! let inquiries = vec![
//!     Record::new(1u64, "Bib pickup?").date("2025-03-01"),
//!     Record::new(2u64, "Refund?")
//!         .date("2025-03-02")
//!         .answer(Answer::new("admin", "2025-03-03", "Until March 10.")),
//!     Record::new(3u64, "Parking?").date("2025-03-04").views(9),
//! ];
//!
//! let ordered = QueryEngine::default().filter(&inquiries, &FilterSpec::new().sort(SortKey::New));
//! let rows = expand(&ordered);
//! let page = page_rows(&rows, PageRequest::new(1, 2), Basis::Parents, Slicing::Threads);
//!
//! // Two questions on the page; the answer rides along with its question.
//! assert_eq!(page.total, 3);
//! assert_eq!(page.rows.len(), 3);
//! assert_eq!(page.rows[0].display_no, Some(3));
//! assert!(page.rows[2].is_reply);
//! assert_eq!(page.rows[2].display_title(), "[RE] Refund?");
//! ```
//!
//! # Sort Keys
//!
//! | Key | Primary | Tie-break |
//! |-----|---------|-----------|
//! | `new` | date desc | id desc |
//! | `old` | date asc | id asc |
//! | `hit` | views desc | input order |
//! | `name` | name field asc (case-folded) | date desc |

mod date;
mod error;
mod marker;
mod ordering;
mod page;
mod query;
mod record;
mod row;
mod spec;
mod thread;
mod traits;
mod value;

// Re-export public API
pub use date::{compare_dates, date_has_prefix, date_prefix, normalize_date};
pub use error::{Result, SeekerError};
pub use marker::{add_reply_marker, bare_title, display_title, strip_reply_marker, REPLY_MARKER};
pub use ordering::{compare_by_orderings, compare_values, orderings_for, Collation, Dir, OrderBy};
pub use page::{
    assign_display_numbers, basis_total, last_page, page_rows, paginate, Basis, PageRequest,
    PageResult, Slicing,
};
pub use query::{filter, QueryEngine, QueryMode, SearchProfile};
pub use record::{Answer, Attachment, Record, RecordId};
pub use row::Row;
pub use spec::{FilterSpec, SearchField, SortKey};
pub use thread::{expand, flatten, unanswered_but_flagged};
pub use traits::Queryable;
pub use value::Value;
