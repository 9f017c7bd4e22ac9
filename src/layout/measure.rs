//! Row height estimation for line items

use serde::{Deserialize, Serialize};
use std::ops::Range;
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// A line item to render on an invoice page.
///
/// Only the name influences layout; quantity and price share the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerItem {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub price: f64,
}

impl PagerItem {
    pub fn new(name: impl Into<String>, quantity: f64, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }
}

/// Estimates the rendered height of an item in millimetres
pub trait RowHeight {
    fn row_height(&self, item: &PagerItem) -> f32;
}

/// Every row gets the same height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRowHeight(pub f32);

impl RowHeight for FixedRowHeight {
    fn row_height(&self, _item: &PagerItem) -> f32 {
        self.0
    }
}

/// Height grows with the number of lines the item name wraps to.
///
/// The description column is measured in grapheme cells rather than glyph widths,
/// which is accurate enough for the monospaced-ish invoice fonts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedRowHeight {
    /// Grapheme cells that fit in the description column
    pub chars_per_line: usize,
    pub line_height_mm: f32,
    /// Vertical padding added once per row
    pub padding_mm: f32,
}

impl Default for WrappedRowHeight {
    fn default() -> Self {
        Self {
            chars_per_line: 48,
            line_height_mm: 4.5,
            padding_mm: 3.5,
        }
    }
}

impl RowHeight for WrappedRowHeight {
    fn row_height(&self, item: &PagerItem) -> f32 {
        let lines = wrap_lines(&item.name, self.chars_per_line).len().max(1);
        self.padding_mm + lines as f32 * self.line_height_mm
    }
}

/// Wrap text into lines no wider than `max_cells` graphemes.
///
/// Lines break at Unicode line-break opportunities; trailing spaces hang past the
/// limit. Words longer than a full line are split at grapheme boundaries. Returns
/// byte ranges, so an empty string yields no lines.
pub fn wrap_lines(text: &str, max_cells: usize) -> Vec<Range<usize>> {
    let max_cells = max_cells.max(1);
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    let mut line_start = 0;
    let mut line_cells = 0;
    let mut segment_start = 0;

    for (break_at, opportunity) in linebreaks(text) {
        let mut word_start = segment_start;
        let mut word_cells = visible_cells(text[word_start..break_at].trim_end());

        if line_cells > 0 && line_cells + word_cells > max_cells {
            lines.push(line_start..word_start);
            line_start = word_start;
            line_cells = 0;
        }

        while line_cells + word_cells > max_cells {
            let split = word_start
                + text[word_start..break_at]
                    .grapheme_indices(true)
                    .nth(max_cells)
                    .map(|(idx, _)| idx)
                    .unwrap_or(break_at - word_start);
            lines.push(line_start..split);
            line_start = split;
            word_start = split;
            word_cells = visible_cells(text[word_start..break_at].trim_end());
        }
        line_cells += visible_cells(&text[word_start..break_at]);

        if opportunity == BreakOpportunity::Mandatory {
            let line = text[line_start..break_at].trim_end_matches(['\n', '\r']);
            lines.push(line_start..line_start + line.len());
            line_start = break_at;
            line_cells = 0;
        }
        segment_start = break_at;
    }

    if line_start < text.len() {
        lines.push(line_start..text.len());
    }

    lines
}

/// Grapheme count, ignoring line terminators
fn visible_cells(segment: &str) -> usize {
    segment
        .graphemes(true)
        .filter(|g| !g.chars().all(|c| c == '\n' || c == '\r'))
        .count()
}
