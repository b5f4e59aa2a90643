//! PageView result type and builder.
//!
//! A `PageView` is what a list screen hands to its table and pagination
//! components:
//! - Rows (numbered, reply rows marked)
//! - Pagination controls (current page, last page, page-number block)
//! - The active sort and the sorts on offer
//! - Filter summary and status messages

use pacer_seeker::{PageResult, Row, SortKey};
use serde::Serialize;

use crate::message::{Message, MessageLevel};

/// How many page numbers the pagination control shows at once.
pub const PAGE_BLOCK: usize = 10;

/// A table row as the table component consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    /// Unique within the page, stable across renders.
    pub key: String,
    /// Title with the reply marker applied.
    pub display_title: String,
    #[serde(flatten)]
    pub row: Row,
}

impl From<Row> for RowView {
    fn from(row: Row) -> Self {
        RowView {
            key: row.key(),
            display_title: row.display_title(),
            row,
        }
    }
}

/// State of the pagination control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    /// The basis total: questions on threaded screens, rows elsewhere.
    pub total: usize,
    pub last_page: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// Page numbers of the block holding the current page, e.g. 11..=20.
    pub pages: Vec<usize>,
}

impl Pagination {
    pub fn from_result(result: &PageResult) -> Self {
        let page = result.page;
        let last = result.last_page;
        let first_in_block = page.saturating_sub(1) / PAGE_BLOCK * PAGE_BLOCK + 1;
        let last_in_block = (first_in_block + PAGE_BLOCK - 1).min(last);
        Pagination {
            page,
            page_size: result.page_size,
            total: result.total,
            last_page: last,
            has_prev: page > 1,
            has_next: page < last,
            pages: (first_in_block..=last_in_block).collect(),
        }
    }
}

/// Result type for one rendered list screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub screen: String,

    /// Rows on the current page.
    pub rows: Vec<RowView>,

    pub pagination: Pagination,

    /// Active sort key.
    pub sort: SortKey,

    /// Sort keys the screen offers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<SortKey>,

    /// Applied filters summary, e.g. "title contains 'refund', status=open".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_summary: Option<String>,

    /// Status messages shown with the table.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
}

impl PageView {
    /// Returns true if the current page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows on the page, replies included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Builder for [`PageView`].
///
/// ```rust
/// use pacer::{page_view, PageRequest, PageResult, SortKey};
///
/// let view = page_view("notices", PageResult::empty(PageRequest::default()))
///     .sort(SortKey::Hit, [SortKey::New, SortKey::Hit])
///     .info("No notices yet.")
///     .build();
/// assert!(view.is_empty());
/// assert_eq!(view.pagination.last_page, 1);
/// ```
#[derive(Debug)]
pub struct PageViewBuilder {
    screen: String,
    result: PageResult,
    sort: SortKey,
    sorts: Vec<SortKey>,
    messages: Vec<Message>,
    filter_summary: Option<String>,
}

impl PageViewBuilder {
    pub fn new(screen: impl Into<String>, result: PageResult) -> Self {
        Self {
            screen: screen.into(),
            result,
            sort: SortKey::default(),
            sorts: Vec::new(),
            messages: Vec::new(),
            filter_summary: None,
        }
    }

    /// Set the active sort and the sorts on offer.
    pub fn sort(mut self, active: SortKey, offered: impl IntoIterator<Item = SortKey>) -> Self {
        self.sort = active;
        self.sorts = offered.into_iter().collect();
        self
    }

    pub fn filter_summary(mut self, summary: Option<String>) -> Self {
        self.filter_summary = summary;
        self
    }

    /// Add a status message.
    pub fn message(mut self, level: MessageLevel, text: impl Into<String>) -> Self {
        self.messages.push(Message::new(level, text));
        self
    }

    pub fn info(self, text: impl Into<String>) -> Self {
        self.message(MessageLevel::Info, text)
    }

    pub fn warning(self, text: impl Into<String>) -> Self {
        self.message(MessageLevel::Warning, text)
    }

    pub fn build(self) -> PageView {
        let pagination = Pagination::from_result(&self.result);
        PageView {
            screen: self.screen,
            rows: self.result.rows.into_iter().map(RowView::from).collect(),
            pagination,
            sort: self.sort,
            sorts: self.sorts,
            filter_summary: self.filter_summary,
            messages: self.messages,
        }
    }
}

/// Start building a [`PageView`].
pub fn page_view(screen: impl Into<String>, result: PageResult) -> PageViewBuilder {
    PageViewBuilder::new(screen, result)
}
