//! Per-screen orchestration of query state, data and pagination.
//!
//! A [`ListController`] owns the [`FilterSpec`] and page of one rendered
//! screen. User actions arrive as triggers:
//!
//! | Trigger | Effect on page |
//! |---------|----------------|
//! | search, filter, sort, reset | back to page 1 |
//! | create, reply | back to page 1 |
//! | delete, update | kept, clamped to the new last page |
//! | page click | the requested page |
//!
//! Every mutation bumps a revision counter. Results are memoized on
//! `(revision, spec, page request)`, so re-rendering an unchanged screen
//! never touches the repository.

use pacer_seeker::{
    assign_display_numbers, expand, flatten, last_page, page_rows, unanswered_but_flagged,
    FilterSpec, PageRequest, PageResult, Record, RecordId, Row, SearchField, SortKey,
};
use tracing::{debug, info, warn};

use crate::config::ScreenConfig;
use crate::error::{ConfigError, ListError};
use crate::repository::{FetchRequest, Fetched, Mutation, RecordRepository};
use crate::view::{page_view, PageView};

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoKey {
    revision: u64,
    spec: FilterSpec,
    request: PageRequest,
}

#[derive(Debug, Clone)]
struct Memo {
    key: MemoKey,
    page: PageResult,
    /// Records flagged answered without an answer, among those fetched.
    missing_answers: Vec<RecordId>,
}

/// Drives one list screen.
///
/// # Example
///
/// ```rust
/// use pacer::{InMemoryRepository, ListController, Record, ScreenConfig};
///
/// let repo = InMemoryRepository::with_records(
///     (1..=25u64).map(|i| Record::new(i, format!("Notice {i}")).date("2025-01-01")),
/// );
/// let mut notices = ListController::new(ScreenConfig::preset("notices")?, repo)?;
///
/// notices.go_to_page(3);
/// let page = notices.current_page()?;
/// assert_eq!(page.rows.len(), 5);
/// assert_eq!(page.rows[0].display_no, Some(5));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ListController<R: RecordRepository> {
    config: ScreenConfig,
    repository: R,
    spec: FilterSpec,
    request: PageRequest,
    revision: u64,
    memo: Option<Memo>,
}

impl<R: RecordRepository> ListController<R> {
    /// Creates a controller on the screen's default spec and first page.
    pub fn new(config: ScreenConfig, repository: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(ListController {
            spec: config.default_spec(),
            request: config.first_page(),
            config,
            repository,
            revision: 0,
            memo: None,
        })
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn first_page(&mut self) {
        self.request = self.request.with_page(1);
    }

    // ========================================================================
    // Triggers
    // ========================================================================

    /// Search trigger: sets the free-text query and the field it targets.
    pub fn search(&mut self, query: impl Into<String>, field: SearchField) {
        self.spec.query = query.into().trim().to_string();
        self.spec.search_field = self.config.resolve_field(field);
        self.first_page();
    }

    /// Filter trigger for a categorical field. An empty value clears it.
    pub fn set_filter(&mut self, key: &str, value: &str) {
        if self.config.allows_filter(key, value) {
            self.spec.set_filter(key, value.trim());
        } else {
            debug!(screen = %self.config.name, key, value, "Ignoring filter the screen does not offer");
        }
        self.first_page();
    }

    /// Filter trigger for the sort order.
    pub fn set_sort(&mut self, sort: SortKey) {
        if self.config.allows_sort(sort) {
            self.spec.sort = sort;
        } else {
            debug!(screen = %self.config.name, sort = %sort, "Ignoring sort the screen does not offer");
        }
        self.first_page();
    }

    /// Clears query, filters and sort back to the screen default.
    pub fn reset_filters(&mut self) {
        self.spec = self.config.default_spec();
        self.first_page();
    }

    /// Replaces the spec, bringing it within what the screen allows.
    pub fn set_spec(&mut self, spec: FilterSpec) {
        self.spec = self.config.normalize_spec(spec);
        self.first_page();
    }

    /// Restores spec and page from query-string parameters.
    pub fn apply_params<I, K, V>(&mut self, params: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let parsed = self.config.parse_params(params);
        self.spec = parsed.spec;
        self.request = parsed.request;
    }

    /// Page trigger. Values below 1 become 1; pages past the end render
    /// empty.
    pub fn go_to_page(&mut self, page: i64) {
        self.request = PageRequest::new(page, self.request.page_size() as i64);
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: i64) {
        self.request = PageRequest::new(1, page_size);
    }

    /// Marks cached results stale after a change made elsewhere.
    pub fn invalidate(&mut self) {
        self.revision += 1;
    }

    /// Mutate trigger: forwards `mutation` to the repository, then bumps the
    /// revision and moves the page per the mutation's policy.
    pub fn mutate(&mut self, mutation: Mutation) -> Result<(), ListError<R::Error>> {
        let kind = mutation.kind();
        let id = mutation.id().clone();
        let resets_page = mutation.resets_page();

        self.repository
            .apply(mutation)
            .map_err(ListError::Repository)?;
        self.revision += 1;
        info!(screen = %self.config.name, op = kind, id = %id, revision = self.revision, "Applied mutation");

        if resets_page {
            self.first_page();
        } else {
            let last = self.current_page()?.last_page;
            if self.request.page() > last {
                warn!(
                    screen = %self.config.name,
                    page = self.request.page(),
                    last_page = last,
                    op = kind,
                    "Page no longer exists, clamping"
                );
                self.request = self.request.with_page(last);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Results
    // ========================================================================

    /// The current page, recomputed only when revision, spec or page
    /// request changed since the last call.
    pub fn current_page(&mut self) -> Result<PageResult, ListError<R::Error>> {
        Ok(self.refresh()?.page.clone())
    }

    /// The current page dressed for the table and pagination components.
    pub fn view(&mut self) -> Result<PageView, ListError<R::Error>> {
        let Memo {
            page,
            missing_answers,
            ..
        } = self.refresh()?.clone();
        let past_end = page.page > page.last_page;
        let requested = page.page;

        let mut builder = page_view(self.config.name.clone(), page)
            .sort(self.spec.sort, self.config.sorts.iter().copied())
            .filter_summary(self.spec.summary());

        if self.config.threaded && !missing_answers.is_empty() {
            builder = builder.warning(format!(
                "{} answered question(s) have no answer to show yet",
                missing_answers.len()
            ));
        }
        if past_end {
            builder = builder.info(format!("Page {requested} is past the last page"));
        }
        Ok(builder.build())
    }

    fn refresh(&mut self) -> Result<&Memo, ListError<R::Error>> {
        let key = MemoKey {
            revision: self.revision,
            spec: self.spec.clone(),
            request: self.request,
        };

        match self.memo.take() {
            Some(memo) if memo.key == key => {
                debug!(screen = %self.config.name, revision = self.revision, "Reusing memoized page");
                Ok(self.memo.insert(memo))
            }
            _ => {
                let memo = self.recompute(key)?;
                Ok(self.memo.insert(memo))
            }
        }
    }

    fn recompute(&self, key: MemoKey) -> Result<Memo, ListError<R::Error>> {
        let fetched = self
            .repository
            .fetch(&FetchRequest {
                spec: key.spec.clone(),
                request: key.request,
            })
            .map_err(ListError::Repository)?;

        let missing_answers: Vec<RecordId> = if self.config.threaded {
            unanswered_but_flagged(&fetched.records)
                .map(|r| r.id.clone())
                .collect()
        } else {
            Vec::new()
        };
        for id in &missing_answers {
            warn!(screen = %self.config.name, id = %id, "Record flagged answered has no answer");
        }

        let page = match fetched {
            Fetched {
                records,
                server_total: Some(total),
            } => self.server_page(&records, total, key.request),
            Fetched { records, .. } => {
                let ordered = self.config.engine().filter(&records, &key.spec);
                let rows = self.rows(&ordered);
                page_rows(&rows, key.request, self.config.basis(), self.config.slicing())
            }
        };

        debug!(
            screen = %self.config.name,
            revision = key.revision,
            page = page.page,
            rows = page.rows.len(),
            total = page.total,
            "Recomputed page"
        );

        Ok(Memo {
            key,
            page,
            missing_answers,
        })
    }

    fn rows<T: AsRef<Record>>(&self, records: &[T]) -> Vec<Row> {
        if self.config.threaded {
            expand(records)
        } else {
            flatten(records)
        }
    }

    /// A page the repository already cut: expand and number only.
    fn server_page(&self, records: &[Record], total: usize, request: PageRequest) -> PageResult {
        let mut rows = self.rows(records);
        assign_display_numbers(&mut rows, total, request);
        PageResult {
            rows,
            total,
            page: request.page(),
            page_size: request.page_size(),
            last_page: last_page(total, request.page_size()),
        }
    }
}
