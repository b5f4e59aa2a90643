//! Pagination and display numbering.
//!
//! Two counts are in play once threads are expanded: the number of rows and
//! the number of parent (question) rows. Callers pick the *basis total* that
//! pagination controls and numbering use; question screens count parents,
//! so "42 questions" stays 42 however many answers ride along.
//!
//! Slicing always walks the expanded row array. With [`Slicing::Threads`] a
//! page holds `page_size` thread units (a parent plus its reply), so a reply
//! never lands on a different page than its question.

use serde::Serialize;

use crate::row::Row;

/// A clamped page request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 1,
            page_size: PageRequest::DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Builds a request; `page < 1` becomes 1 and `page_size <= 0` becomes 1.
    pub fn new(page: i64, page_size: i64) -> Self {
        PageRequest {
            page: clamp_positive(page),
            page_size: clamp_positive(page_size),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The same size on another page.
    pub fn with_page(self, page: usize) -> Self {
        PageRequest {
            page: page.max(1),
            ..self
        }
    }

    /// Units (rows or threads) before this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

fn clamp_positive(n: i64) -> usize {
    usize::try_from(n.max(1)).unwrap_or(usize::MAX)
}

/// The unit a page is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slicing {
    /// `page_size` rows per page.
    #[default]
    Rows,
    /// `page_size` thread units per page; replies ride with their parent.
    Threads,
}

/// What the basis total counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    /// Every row, replies included.
    #[default]
    Rows,
    /// Parent rows only.
    Parents,
}

/// Counts `rows` under `basis`.
pub fn basis_total(rows: &[Row], basis: Basis) -> usize {
    match basis {
        Basis::Rows => rows.len(),
        Basis::Parents => rows.iter().filter(|r| !r.is_reply).count(),
    }
}

/// The last valid page for `total` items; never less than 1.
pub fn last_page(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// One page of rows plus the metadata the pagination controls need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub rows: Vec<Row>,
    /// The caller's basis total, not the number of rows on this page.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub last_page: usize,
}

impl PageResult {
    /// An empty result for `request`.
    pub fn empty(request: PageRequest) -> Self {
        PageResult {
            rows: Vec::new(),
            total: 0,
            page: request.page(),
            page_size: request.page_size(),
            last_page: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parent rows on this page.
    pub fn parents(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| !r.is_reply)
    }
}

/// Indices where thread units start.
///
/// A reply directly after its parent belongs to the parent's unit; any other
/// row, including a stray reply, starts a unit of its own.
fn unit_starts(rows: &[Row]) -> Vec<usize> {
    (0..rows.len())
        .filter(|&i| i == 0 || !rows[i].replies_to(&rows[i - 1]))
        .collect()
}

/// Cuts one page out of `rows`.
///
/// `basis_total` is reported back unchanged as `total`. A page past the end
/// yields no rows; it never wraps around.
pub fn paginate(
    rows: &[Row],
    request: PageRequest,
    basis_total: usize,
    slicing: Slicing,
) -> PageResult {
    let range = match slicing {
        Slicing::Rows => {
            let start = request.offset().min(rows.len());
            let end = start.saturating_add(request.page_size()).min(rows.len());
            start..end
        }
        Slicing::Threads => {
            let starts = unit_starts(rows);
            let first = request.offset();
            match starts.get(first) {
                Some(&start) => {
                    let end = first
                        .checked_add(request.page_size())
                        .and_then(|unit| starts.get(unit).copied())
                        .unwrap_or(rows.len());
                    start..end
                }
                None => rows.len()..rows.len(),
            }
        }
    };

    PageResult {
        rows: rows[range].to_vec(),
        total: basis_total,
        page: request.page(),
        page_size: request.page_size(),
        last_page: last_page(basis_total, request.page_size()),
    }
}

/// Numbers the parent rows of one page, counting down from `basis_total`.
///
/// The n-th parent on page `p` (0-based) gets
/// `basis_total - (p - 1) * page_size - n`. Reply rows get no number.
pub fn assign_display_numbers(rows: &mut [Row], basis_total: usize, request: PageRequest) {
    let top = basis_total.saturating_sub(request.offset());
    let mut index = 0;
    for row in rows.iter_mut() {
        if row.is_reply {
            row.display_no = None;
        } else {
            row.display_no = Some(top.saturating_sub(index));
            index += 1;
        }
    }
}

/// Paginates and numbers in one step, computing the basis from `rows`.
pub fn page_rows(rows: &[Row], request: PageRequest, basis: Basis, slicing: Slicing) -> PageResult {
    let total = basis_total(rows, basis);
    let mut result = paginate(rows, request, total, slicing);
    assign_display_numbers(&mut result.rows, total, request);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Answer, Record};
    use crate::thread::{expand, flatten};

    fn plain(n: u64) -> Vec<Row> {
        let records: Vec<Record> = (1..=n).rev().map(|i| Record::new(i, "q")).collect();
        flatten(&records)
    }

    fn threaded() -> Vec<Row> {
        // 5 questions, ids 5..1, odd ones answered
        let records: Vec<Record> = (1..=5u64)
            .rev()
            .map(|i| {
                let r = Record::new(i, format!("q{i}"));
                if i % 2 == 1 {
                    r.answer(Answer::new("admin", "2025-01-01", "a"))
                } else {
                    r
                }
            })
            .collect();
        expand(&records)
    }

    #[test]
    fn request_clamps_degenerate_input() {
        let r = PageRequest::new(0, 0);
        assert_eq!((r.page(), r.page_size()), (1, 1));
        let r = PageRequest::new(-3, -20);
        assert_eq!((r.page(), r.page_size()), (1, 1));
        let r = PageRequest::new(3, 20);
        assert_eq!(r.offset(), 40);
    }

    #[test]
    fn last_page_is_at_least_one() {
        assert_eq!(last_page(0, 10), 1);
        assert_eq!(last_page(10, 10), 1);
        assert_eq!(last_page(11, 10), 2);
        assert_eq!(last_page(5, 0), 5);
    }

    #[test]
    fn row_slicing_takes_page_size_rows() {
        let rows = plain(25);
        let page = paginate(&rows, PageRequest::new(3, 10), rows.len(), Slicing::Rows);
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.total, 25);
        assert_eq!(page.last_page, 3);
    }

    #[test]
    fn page_past_the_end_is_empty_with_total_unchanged() {
        let rows = plain(5);
        for slicing in [Slicing::Rows, Slicing::Threads] {
            let page = paginate(&rows, PageRequest::new(4, 2), 5, slicing);
            assert!(page.is_empty());
            assert_eq!(page.total, 5);
            assert_eq!(page.page, 4);
        }
    }

    #[test]
    fn thread_slicing_keeps_replies_with_parents() {
        let rows = threaded();
        // units: [5,5r] [4] [3,3r] [2] [1,1r]
        let first = paginate(&rows, PageRequest::new(1, 2), 5, Slicing::Threads);
        assert_eq!(first.rows.len(), 3);
        assert!(first.rows[1].replies_to(&first.rows[0]));

        let second = paginate(&rows, PageRequest::new(2, 2), 5, Slicing::Threads);
        assert_eq!(second.rows.len(), 3);
        assert!(second.rows[1].replies_to(&second.rows[0]));
        assert!(!second.rows[2].is_reply);

        let third = paginate(&rows, PageRequest::new(3, 2), 5, Slicing::Threads);
        assert_eq!(third.rows.len(), 2);
        assert_eq!(third.last_page, 3);
    }

    #[test]
    fn stray_reply_forms_its_own_unit() {
        let mut rows = threaded();
        rows.remove(0);
        let starts = unit_starts(&rows);
        assert_eq!(starts[0], 0);
        assert_eq!(starts[1], 1);
    }

    #[test]
    fn numbering_counts_down_from_basis_skipping_replies() {
        let rows = threaded();
        let request = PageRequest::new(2, 2);
        let mut page = paginate(&rows, request, 5, Slicing::Threads);
        assign_display_numbers(&mut page.rows, 5, request);
        let numbers: Vec<_> = page.rows.iter().map(|r| r.display_no).collect();
        assert_eq!(numbers, vec![Some(3), None, Some(2)]);
    }

    #[test]
    fn numbering_example_page_two_of_42() {
        let rows = plain(42);
        let request = PageRequest::new(2, 20);
        let result = page_rows(&rows, request, Basis::Parents, Slicing::Rows);
        assert_eq!(result.rows[0].display_no, Some(22));
        assert_eq!(result.rows[19].display_no, Some(3));
    }

    #[test]
    fn basis_counts() {
        let rows = threaded();
        assert_eq!(basis_total(&rows, Basis::Rows), 8);
        assert_eq!(basis_total(&rows, Basis::Parents), 5);
    }

    #[test]
    fn numbers_saturate_at_zero() {
        let mut rows = plain(3);
        assign_display_numbers(&mut rows, 1, PageRequest::new(1, 10));
        let numbers: Vec<_> = rows.iter().map(|r| r.display_no).collect();
        assert_eq!(numbers, vec![Some(1), Some(0), Some(0)]);
    }
}
