//! Serialized pagination requests shared by the CLI and the WASM bridge

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{
    paginate_by_heights_with_extras, paginate_fixed, paginate_items, paginate_items_with,
    Extras, PageConfig, Pages, PagerItem, WrappedRowHeight,
};

/// One pagination request, tagged by `mode`.
///
/// ```json
/// {"mode": "heights", "config": {...}, "heightsPx": [42, 42], "extraBottomPx": 120}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum PaginationJob {
    /// Line items with estimated heights; `wrap` switches to name-wrapping estimates
    #[serde(rename_all = "camelCase")]
    Items {
        config: PageConfig,
        items: Vec<PagerItem>,
        #[serde(default)]
        wrap: Option<WrappedRowHeight>,
    },
    /// Measured pixel heights, converted with the config's dpi
    #[serde(rename_all = "camelCase")]
    Heights {
        config: PageConfig,
        heights_px: Vec<f32>,
        #[serde(default)]
        extra_top_px: f32,
        #[serde(default)]
        extra_bottom_px: f32,
    },
    /// Fixed rows per page, no geometry
    #[serde(rename_all = "camelCase")]
    Fixed { length: usize, per_page: i64 },
}

/// Pages plus the count, as handed back to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult {
    pub page_count: usize,
    pub pages: Pages,
}

impl From<Pages> for PaginationResult {
    fn from(pages: Pages) -> Self {
        Self {
            page_count: pages.len(),
            pages,
        }
    }
}

impl PaginationJob {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the config (if any) and paginate
    pub fn run(&self) -> Result<Pages> {
        match self {
            PaginationJob::Items {
                config,
                items,
                wrap,
            } => {
                config.validate()?;
                Ok(match wrap {
                    Some(estimator) => paginate_items_with(items, config, estimator),
                    None => paginate_items(items, config),
                })
            }
            PaginationJob::Heights {
                config,
                heights_px,
                extra_top_px,
                extra_bottom_px,
            } => {
                config.validate()?;
                let heights = config.heights_px_to_mm(heights_px);
                let extras = Extras::from_px(*extra_top_px, *extra_bottom_px, config.dpi);
                Ok(paginate_by_heights_with_extras(&heights, config, extras))
            }
            PaginationJob::Fixed { length, per_page } => {
                Ok(paginate_fixed(*length, clamp_page_size(*per_page)))
            }
        }
    }
}

/// Page sizes of zero or below fall back to one row per page
pub fn clamp_page_size(per_page: i64) -> usize {
    usize::try_from(per_page).unwrap_or(0).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PagerError;

    #[test]
    fn test_fixed_job() {
        let job = PaginationJob::from_json(r#"{"mode":"fixed","length":10,"perPage":3}"#).unwrap();
        assert_eq!(
            job.run().unwrap(),
            vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8], vec![9]]
        );
    }

    #[test]
    fn test_fixed_job_negative_page_size() {
        let job = PaginationJob::Fixed {
            length: 2,
            per_page: -4,
        };
        assert_eq!(job.run().unwrap(), vec![vec![0], vec![1]]);
        assert_eq!(clamp_page_size(0), 1);
        assert_eq!(clamp_page_size(25), 25);
    }

    #[test]
    fn test_items_job() {
        let json = r#"{
            "mode": "items",
            "config": {"pageHeightMm": 100, "headerHeightMm": 10, "footerHeightMm": 10,
                       "minLastPageRows": 0, "rowHeightMm": 40},
            "items": [
                {"name": "Design", "quantity": 1, "price": 500},
                {"name": "Build", "quantity": 2, "price": 900},
                {"name": "Support"}
            ]
        }"#;
        let pages = PaginationJob::from_json(json).unwrap().run().unwrap();
        assert_eq!(pages, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_heights_job_converts_pixels() {
        // At 25.4 dpi one pixel is one millimetre
        let json = r#"{
            "mode": "heights",
            "config": {"pageHeightMm": 100, "headerHeightMm": 0, "footerHeightMm": 0,
                       "minLastPageRows": 1, "dpi": 25.4},
            "heightsPx": [50, 50],
            "extraBottomPx": 40
        }"#;
        let pages = PaginationJob::from_json(json).unwrap().run().unwrap();
        assert_eq!(pages, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_job_rejects_invalid_config() {
        let job = PaginationJob::Heights {
            config: PageConfig::new(50.0, 30.0, 30.0, 1),
            heights_px: vec![10.0],
            extra_top_px: 0.0,
            extra_bottom_px: 0.0,
        };
        assert!(matches!(job.run(), Err(PagerError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_mode() {
        assert!(matches!(
            PaginationJob::from_json(r#"{"mode":"spiral"}"#),
            Err(PagerError::Json(_))
        ));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = PaginationResult::from(vec![vec![0, 1], vec![2]]);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"pageCount":2,"pages":[[0,1],[2]]}"#);
    }
}
