//! Page geometry for paginated invoices

use serde::{Deserialize, Serialize};

use crate::error::{PagerError, Result};

/// CSS reference resolution used when converting measured pixels
pub const DEFAULT_DPI: f32 = 96.0;

/// Row height assumed for a line item when nothing was measured
pub const DEFAULT_ROW_HEIGHT_MM: f32 = 8.0;

/// Millimetres per inch
const MM_PER_INCH: f32 = 25.4;

/// Page geometry and last-page policy.
///
/// All lengths are millimetres. The header and footer are reserved on every page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub page_height_mm: f32,
    pub header_height_mm: f32,
    pub footer_height_mm: f32,
    /// Minimum rows on the final page when more than one page is produced
    pub min_last_page_rows: usize,
    /// Estimated height of one line item (used by `paginate_items`)
    #[serde(default = "default_row_height_mm")]
    pub row_height_mm: f32,
    /// Resolution of pixel measurements handed to the height-based pager
    #[serde(default = "default_dpi")]
    pub dpi: f32,
}

fn default_row_height_mm() -> f32 {
    DEFAULT_ROW_HEIGHT_MM
}

fn default_dpi() -> f32 {
    DEFAULT_DPI
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageConfig {
    pub fn new(
        page_height_mm: f32,
        header_height_mm: f32,
        footer_height_mm: f32,
        min_last_page_rows: usize,
    ) -> Self {
        Self {
            page_height_mm,
            header_height_mm,
            footer_height_mm,
            min_last_page_rows,
            row_height_mm: DEFAULT_ROW_HEIGHT_MM,
            dpi: DEFAULT_DPI,
        }
    }

    /// A4 portrait with the usual invoice header and totals footer
    pub fn a4() -> Self {
        Self::new(297.0, 50.0, 30.0, 3)
    }

    pub fn with_row_height_mm(mut self, row_height_mm: f32) -> Self {
        self.row_height_mm = row_height_mm;
        self
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_min_last_page_rows(mut self, rows: usize) -> Self {
        self.min_last_page_rows = rows;
        self
    }

    /// Height left for rows once header and footer are reserved
    pub fn usable_height_mm(&self) -> f32 {
        self.page_height_mm - self.header_height_mm - self.footer_height_mm
    }

    /// Convert pixel measurements to millimetres at this config's resolution
    pub fn heights_px_to_mm(&self, heights_px: &[f32]) -> Vec<f32> {
        heights_px.iter().map(|&px| px_to_mm(px, self.dpi)).collect()
    }

    /// Check the geometry invariants.
    ///
    /// Pagination itself accepts any config; this is for configs arriving from outside.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("pageHeightMm", self.page_height_mm),
            ("headerHeightMm", self.header_height_mm),
            ("footerHeightMm", self.footer_height_mm),
            ("rowHeightMm", self.row_height_mm),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(PagerError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(PagerError::InvalidConfig(format!(
                "dpi must be positive, got {}",
                self.dpi
            )));
        }

        if self.usable_height_mm() <= 0.0 {
            return Err(PagerError::InvalidConfig(format!(
                "header ({}) and footer ({}) leave no room on a {} mm page",
                self.header_height_mm, self.footer_height_mm, self.page_height_mm
            )));
        }

        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// One-time reservations: `top` on the first page only, `bottom` on the last page only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extras {
    pub top: f32,
    pub bottom: f32,
}

impl Extras {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    pub fn bottom(bottom: f32) -> Self {
        Self { top: 0.0, bottom }
    }

    /// Reservations measured in pixels at `dpi`
    pub fn from_px(top_px: f32, bottom_px: f32, dpi: f32) -> Self {
        Self::new(px_to_mm(top_px, dpi), px_to_mm(bottom_px, dpi))
    }
}

/// Pixels to millimetres at the given resolution
pub fn px_to_mm(px: f32, dpi: f32) -> f32 {
    px * MM_PER_INCH / dpi
}

/// Millimetres to pixels at the given resolution
pub fn mm_to_px(mm: f32, dpi: f32) -> f32 {
    mm * dpi / MM_PER_INCH
}
