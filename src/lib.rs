//! Invoice Pager: splits invoice line items across fixed-height PDF pages
//!
//! This crate provides:
//! - Greedy page filling from estimated or measured row heights
//! - One-time reservations on the first and last page (e.g. a totals block)
//! - Last-page orphan control that never breaks page capacity
//! - Fixed rows-per-page chunking
//! - A JSON job format and WASM bindings with a flat page buffer
//!
//! Every paginate function is pure: same input, same pages, no shared state.

pub mod error;
pub mod job;
pub mod layout;
pub mod wasm;

pub use error::{PagerError, Result};
pub use job::{PaginationJob, PaginationResult};
pub use layout::{
    paginate_by_heights, paginate_by_heights_with_extras, paginate_fixed, paginate_items,
    paginate_items_with, split_pages, Extras, FixedRowHeight, PageConfig, Pages, PagerItem,
    RowHeight, WrappedRowHeight,
};

// Re-export WASM types for direct use
pub use wasm::WasmPager;

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(count: usize) -> Vec<PagerItem> {
        (0..count)
            .map(|i| PagerItem::new(format!("Line {}", i + 1), 1.0, 99.0))
            .collect()
    }

    #[test]
    fn test_a4_invoice() {
        // 217 mm usable at 8 mm per row: 27 rows per page
        let pages = paginate_items(&invoice(60), &PageConfig::a4());

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 27);
        assert_eq!(pages.concat(), (0..60).collect::<Vec<_>>());
        assert!(pages.last().unwrap().len() >= 3);
    }

    #[test]
    fn test_a4_orphan_control() {
        // 28 rows would leave one row alone on page two
        let items = invoice(28);
        let pages = paginate_items(&items, &PageConfig::a4());

        assert_eq!(pages.iter().map(Vec::len).collect::<Vec<_>>(), vec![25, 3]);

        let slices = split_pages(&items, &pages);
        assert_eq!(slices[1][0].name, "Line 26");
    }
}
