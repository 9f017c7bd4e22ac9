//! Pagination of invoice rows onto fixed-height pages
//!
//! Rows are packed greedily in input order. Two post-passes then adjust the tail:
//! the last page is split if the one-time bottom reservation no longer fits, and
//! rows are pulled forward from the penultimate page so the last page is not left
//! with a lonely row or two (orphan control).
//!
//! Capacity wins over the minimum-row policy: a row only moves if the last page
//! still fits afterwards. A row that alone exceeds a page is placed on its own page.

use std::ops::Range;

use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::layout::config::{Extras, PageConfig};
use crate::layout::measure::{FixedRowHeight, PagerItem, RowHeight};

/// Slack for float accumulation when comparing against a page budget
const EPSILON: f32 = 1e-4;

/// Row indices per page, in input order
pub type Pages = Vec<Vec<usize>>;

/// Contiguous row ranges, one per page
type PageSpans = SmallVec<[Range<usize>; 8]>;

/// Space available to rows on each page of one run
#[derive(Debug, Clone, Copy)]
struct Budget {
    usable: f32,
    top: f32,
    bottom: f32,
}

impl Budget {
    fn new(cfg: &PageConfig, extras: Extras) -> Self {
        Self {
            usable: cfg.usable_height_mm(),
            top: extras.top.max(0.0),
            bottom: extras.bottom.max(0.0),
        }
    }

    fn capacity(&self, page_index: usize, is_last: bool) -> f32 {
        let mut capacity = self.usable;
        if page_index == 0 {
            capacity -= self.top;
        }
        if is_last {
            capacity -= self.bottom;
        }
        capacity
    }
}

struct Pager<'a> {
    heights: &'a [f32],
    budget: Budget,
}

impl Pager<'_> {
    fn load(&self, span: &Range<usize>) -> f32 {
        self.heights[span.clone()].iter().sum()
    }

    fn fits(&self, span: &Range<usize>, page_index: usize, is_last: bool) -> bool {
        self.load(span) <= self.budget.capacity(page_index, is_last) + EPSILON
    }

    /// Greedy fill, treating every page as a non-final page
    fn fill(&self) -> PageSpans {
        let mut spans = PageSpans::new();
        let mut start = 0;
        let mut used = 0.0;

        for (row, &height) in self.heights.iter().enumerate() {
            let capacity = self.budget.capacity(spans.len(), false);
            if row > start && used + height > capacity + EPSILON {
                trace!("page {} ends before row {row} ({used:.2} mm used)", spans.len());
                spans.push(start..row);
                start = row;
                used = 0.0;
            }

            if row == start && height > self.budget.capacity(spans.len(), false) + EPSILON {
                warn!("row {row} ({height:.2} mm) does not fit a page, placing it alone");
            }
            used += height;
        }

        if start < self.heights.len() {
            spans.push(start..self.heights.len());
        }
        spans
    }

    /// Split the last page if it overflows once the bottom reservation applies.
    ///
    /// The longest suffix that fits the last-page budget becomes the new last page.
    /// The prefix already fitted as a non-final page, so one split settles the tail.
    fn reserve_bottom(&self, spans: &mut PageSpans) {
        let Some(last) = spans.last().cloned() else {
            return;
        };
        let index = spans.len() - 1;
        if self.fits(&last, index, true) || last.len() < 2 {
            return;
        }

        let capacity = self.budget.capacity(index + 1, true);
        let mut split = last.end - 1;
        let mut used = self.heights[split];
        while split - 1 > last.start && used + self.heights[split - 1] <= capacity + EPSILON {
            split -= 1;
            used += self.heights[split];
        }

        trace!(
            "bottom reservation moves rows {}..{} to a new last page",
            split,
            last.end
        );
        spans.pop();
        spans.push(last.start..split);
        spans.push(split..last.end);
    }

    /// Pull rows from the penultimate page until the last page has `min_rows`
    fn rebalance_last(&self, spans: &mut PageSpans, min_rows: usize) {
        while spans.len() > 1 {
            let last_index = spans.len() - 1;
            let last = spans[last_index].clone();
            let donor = &spans[last_index - 1];

            if last.len() >= min_rows || donor.len() <= 1 {
                break;
            }

            let grown = (last.start - 1)..last.end;
            if !self.fits(&grown, last_index, true) {
                trace!(
                    "last page is full at {} rows, minimum {min_rows} not reached",
                    last.len()
                );
                break;
            }

            trace!("row {} moves to the last page", grown.start);
            spans[last_index - 1].end -= 1;
            spans[last_index].start -= 1;
        }
    }

    fn paginate(&self, min_rows: usize) -> PageSpans {
        let mut spans = self.fill();
        self.reserve_bottom(&mut spans);
        self.rebalance_last(&mut spans, min_rows);
        spans
    }
}

fn to_pages(spans: PageSpans) -> Pages {
    spans.into_iter().map(|span| span.collect()).collect()
}

/// Paginate line items using the config's fixed row height
pub fn paginate_items(items: &[PagerItem], cfg: &PageConfig) -> Pages {
    paginate_items_with(items, cfg, &FixedRowHeight(cfg.row_height_mm))
}

/// Paginate line items with a custom row height estimator
pub fn paginate_items_with<H>(items: &[PagerItem], cfg: &PageConfig, estimator: &H) -> Pages
where
    H: RowHeight + ?Sized,
{
    let heights: Vec<f32> = items.iter().map(|item| estimator.row_height(item)).collect();
    paginate_by_heights_with_extras(&heights, cfg, Extras::default())
}

/// Paginate measured row heights with no one-time reservations
pub fn paginate_by_heights(heights: &[f32], cfg: &PageConfig) -> Pages {
    paginate_by_heights_with_extras(heights, cfg, Extras::default())
}

/// Paginate measured row heights.
///
/// Heights are in millimetres, like the config; convert pixel measurements with
/// [`PageConfig::heights_px_to_mm`] first. `extras.top` is reserved on the first
/// page and `extras.bottom` on the last. Negative or NaN heights count as zero.
pub fn paginate_by_heights_with_extras(
    heights: &[f32],
    cfg: &PageConfig,
    extras: Extras,
) -> Pages {
    if heights.is_empty() {
        return Pages::new();
    }

    let heights: Vec<f32> = heights.iter().map(|h| h.max(0.0)).collect();
    let pager = Pager {
        heights: &heights,
        budget: Budget::new(cfg, extras),
    };
    let spans = pager.paginate(cfg.min_last_page_rows);

    debug!(
        "paginated {} rows onto {} pages ({:.1} mm usable)",
        heights.len(),
        spans.len(),
        pager.budget.usable
    );
    to_pages(spans)
}

/// Chunk `length` rows into pages of `per_page`; a zero page size is treated as 1
pub fn paginate_fixed(length: usize, per_page: usize) -> Pages {
    let per_page = per_page.max(1);
    (0..length)
        .step_by(per_page)
        .map(|start| (start..(start + per_page).min(length)).collect())
        .collect()
}

/// Borrow the rows of each page from the original item list
pub fn split_pages<'a, T>(items: &'a [T], pages: &[Vec<usize>]) -> Vec<&'a [T]> {
    pages
        .iter()
        .map(|page| match (page.first(), page.last()) {
            (Some(&first), Some(&last)) => items.get(first..=last).unwrap_or(&[]),
            _ => &[],
        })
        .collect()
}
