//! Invoice page layout: geometry, row measurement and pagination

pub mod config;
pub mod measure;
mod pagination;

pub use config::{mm_to_px, px_to_mm, Extras, PageConfig, DEFAULT_DPI, DEFAULT_ROW_HEIGHT_MM};
pub use measure::{wrap_lines, FixedRowHeight, PagerItem, RowHeight, WrappedRowHeight};
pub use pagination::{
    paginate_by_heights, paginate_by_heights_with_extras, paginate_fixed, paginate_items,
    paginate_items_with, split_pages, Pages,
};
