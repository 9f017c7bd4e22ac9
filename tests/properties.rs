//! Property checks for the pager over random row heights and page geometry

use invoice_pager::{
    paginate_by_heights_with_extras, paginate_fixed, Extras, PageConfig, Pages,
};
use proptest::prelude::*;

/// Float slack used when re-adding page loads
const SLACK: f32 = 1e-3;

fn load(heights: &[f32], page: &[usize]) -> f32 {
    page.iter().map(|&i| heights[i]).sum()
}

fn budget(cfg: &PageConfig, extras: Extras, page_index: usize, page_count: usize) -> f32 {
    let mut budget = cfg.usable_height_mm();
    if page_index == 0 {
        budget -= extras.top;
    }
    if page_index + 1 == page_count {
        budget -= extras.bottom;
    }
    budget
}

fn assert_covers_in_order(pages: &Pages, length: usize) -> Result<(), TestCaseError> {
    prop_assert!(pages.iter().all(|page| !page.is_empty()));
    prop_assert_eq!(pages.concat(), (0..length).collect::<Vec<_>>());
    Ok(())
}

proptest! {
    #[test]
    fn pages_cover_every_row_in_order(
        heights in prop::collection::vec(0.0f32..60.0, 0..80),
        min_rows in 0usize..6,
        top in 0.0f32..30.0,
        bottom in 0.0f32..30.0,
    ) {
        let cfg = PageConfig::new(150.0, 20.0, 10.0, min_rows);
        let pages = paginate_by_heights_with_extras(&heights, &cfg, Extras::new(top, bottom));
        assert_covers_in_order(&pages, heights.len())?;
    }

    #[test]
    fn pages_respect_capacity(
        heights in prop::collection::vec(1.0f32..40.0, 1..80),
        min_rows in 0usize..6,
        top in 0.0f32..30.0,
        bottom in 0.0f32..30.0,
    ) {
        // Rows are at most 40 mm and the smallest budget is 60 mm, so none is oversized
        let cfg = PageConfig::new(150.0, 20.0, 10.0, min_rows);
        let extras = Extras::new(top, bottom);
        let pages = paginate_by_heights_with_extras(&heights, &cfg, extras);

        for (index, page) in pages.iter().enumerate() {
            let budget = budget(&cfg, extras, index, pages.len());
            prop_assert!(
                load(&heights, page) <= budget + SLACK,
                "page {} holds {} mm, budget {} mm",
                index,
                load(&heights, page),
                budget
            );
        }
    }

    #[test]
    fn last_page_meets_minimum_with_uniform_rows(
        rows in 1usize..120,
        row_height in 2.0f32..10.0,
        min_rows in 0usize..8,
    ) {
        // 120 mm usable fits at least 12 rows, more than any minimum drawn here
        let cfg = PageConfig::new(150.0, 20.0, 10.0, min_rows).with_row_height_mm(row_height);
        let heights = vec![row_height; rows];
        let pages = paginate_by_heights_with_extras(&heights, &cfg, Extras::default());

        if pages.len() > 1 {
            prop_assert!(pages.last().unwrap().len() >= min_rows);
        } else {
            prop_assert_eq!(pages[0].len(), rows);
        }
    }

    #[test]
    fn pagination_is_deterministic(
        heights in prop::collection::vec(0.0f32..200.0, 0..60),
        min_rows in 0usize..6,
        bottom in 0.0f32..50.0,
    ) {
        let cfg = PageConfig::new(150.0, 20.0, 10.0, min_rows);
        let extras = Extras::bottom(bottom);
        prop_assert_eq!(
            paginate_by_heights_with_extras(&heights, &cfg, extras),
            paginate_by_heights_with_extras(&heights, &cfg, extras)
        );
    }

    #[test]
    fn fixed_chunks_are_exact(length in 0usize..200, per_page in 1usize..25) {
        let pages = paginate_fixed(length, per_page);
        assert_covers_in_order(&pages, length)?;
        prop_assert_eq!(pages.len(), (length + per_page - 1) / per_page);
        prop_assert!(pages.iter().rev().skip(1).all(|page| page.len() == per_page));
    }
}
