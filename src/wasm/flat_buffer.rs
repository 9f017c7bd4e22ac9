//! Flat buffer protocol for handing page groups to JS without serialization
//!
//! ## u32 Buffer Layout:
//! ```text
//! [0]     MAGIC (0x494E5650 = "INVP" for validation)
//! [1]     SCHEMA_VERSION (protocol version, currently 1)
//! [2]     page_count
//! [3]     index_count (total rows across all pages)
//! [4 .. 4 + page_count + 1]
//!         page offsets into the index section; page i covers
//!         indices[offsets[i] .. offsets[i + 1]]
//! [..]    row indices, page after page
//! ```
//!
//! Since pages are contiguous, JS usually only needs the offsets:
//! `items.slice(indices[offsets[i]], indices[offsets[i + 1] - 1] + 1)`.

use crate::error::{PagerError, Result};
use crate::layout::Pages;

/// Magic number for format validation: "INVP" (INVoice Pages)
pub const MAGIC: u32 = 0x494E5650;

/// Schema version for protocol compatibility checking
pub const SCHEMA_VERSION: u32 = 1;

/// Header size in u32 elements
pub const HEADER_SIZE: usize = 4;

/// Page buffer for zero-copy WASM transfer
#[derive(Debug, Default)]
pub struct PageBuffer {
    pub u32_data: Vec<u32>,
}

impl PageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.u32_data.clear();
    }

    /// Encode pages, reusing the existing allocation when it is large enough
    pub fn write_pages(&mut self, pages: &Pages) {
        let index_count: usize = pages.iter().map(Vec::len).sum();
        let needed = HEADER_SIZE + pages.len() + 1 + index_count;

        self.u32_data.clear();
        self.u32_data.reserve(needed);

        self.u32_data.push(MAGIC); //                     [0] magic number
        self.u32_data.push(SCHEMA_VERSION); //            [1] schema version
        self.u32_data.push(pages.len() as u32); //        [2] page_count
        self.u32_data.push(index_count as u32); //        [3] index_count

        let mut offset = 0u32;
        self.u32_data.push(offset);
        for page in pages {
            offset += page.len() as u32;
            self.u32_data.push(offset);
        }

        for page in pages {
            self.u32_data.extend(page.iter().map(|&row| row as u32));
        }
    }

    pub fn page_count(&self) -> u32 {
        self.u32_data.get(2).copied().unwrap_or(0)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.u32_data
    }

    pub fn u32_ptr(&self) -> u32 {
        self.u32_data.as_ptr() as u32
    }

    pub fn u32_len(&self) -> u32 {
        self.u32_data.len() as u32
    }

    /// Rebuild page groups from an encoded buffer, validating the header
    pub fn decode(data: &[u32]) -> Result<Pages> {
        if data.len() < HEADER_SIZE {
            return Err(PagerError::BufferFormat(format!(
                "buffer holds {} words, header needs {HEADER_SIZE}",
                data.len()
            )));
        }
        if data[0] != MAGIC {
            return Err(PagerError::BufferFormat(format!(
                "bad magic {:#010x}",
                data[0]
            )));
        }
        if data[1] != SCHEMA_VERSION {
            return Err(PagerError::BufferFormat(format!(
                "unsupported schema version {}",
                data[1]
            )));
        }

        let page_count = data[2] as usize;
        let index_count = data[3] as usize;
        let offsets_end = HEADER_SIZE + page_count + 1;
        if data.len() != offsets_end + index_count {
            return Err(PagerError::BufferFormat(format!(
                "expected {} words for {page_count} pages and {index_count} rows, got {}",
                offsets_end + index_count,
                data.len()
            )));
        }

        let offsets = &data[HEADER_SIZE..offsets_end];
        let indices = &data[offsets_end..];
        let mut pages = Pages::with_capacity(page_count);

        for window in offsets.windows(2) {
            let (start, end) = (window[0] as usize, window[1] as usize);
            let page = indices.get(start..end).ok_or_else(|| {
                PagerError::BufferFormat(format!("page offsets {start}..{end} out of range"))
            })?;
            pages.push(page.iter().map(|&row| row as usize).collect());
        }

        Ok(pages)
    }
}
