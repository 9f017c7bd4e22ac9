//! WASM bindings for the pager

pub mod flat_buffer;

use js_sys::Uint32Array;
use wasm_bindgen::prelude::*;

use crate::error::PagerError;
use crate::job::{clamp_page_size, PaginationJob};
use crate::layout::{
    paginate_by_heights_with_extras, paginate_fixed, paginate_items, Extras, PageConfig, Pages,
    PagerItem,
};
use flat_buffer::PageBuffer;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js_error(err: PagerError) -> JsValue {
    JsError::new(&err.to_string()).into()
}

/// WASM-exposed pager.
///
/// Every `paginate*` call re-encodes the shared page buffer and returns the page
/// count. JS reads the result either as a copy (`getPages`) or straight from
/// linear memory via `getBufferPtr`/`getBufferLen`; the view stays valid until
/// the next call.
#[wasm_bindgen]
pub struct WasmPager {
    config: PageConfig,
    buffer: PageBuffer,
}

#[wasm_bindgen]
impl WasmPager {
    /// Create a pager for A4 invoices
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: PageConfig::default(),
            buffer: PageBuffer::new(),
        }
    }

    /// Create a pager from a JSON page config (camelCase fields, millimetres)
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<WasmPager, JsValue> {
        let config = PageConfig::from_json(config_json).map_err(to_js_error)?;
        Ok(Self {
            config,
            buffer: PageBuffer::new(),
        })
    }

    /// Paginate a JSON array of `{name, quantity, price}` line items
    #[wasm_bindgen(js_name = paginateItems)]
    pub fn paginate_items(&mut self, items_json: &str) -> Result<u32, JsValue> {
        let items: Vec<PagerItem> = serde_json::from_str(items_json)
            .map_err(|err| to_js_error(PagerError::from(err)))?;
        let pages = paginate_items(&items, &self.config);
        Ok(self.store(&pages))
    }

    /// Paginate measured DOM heights in pixels
    #[wasm_bindgen(js_name = paginateByHeights)]
    pub fn paginate_by_heights(
        &mut self,
        heights_px: &[f32],
        extra_top_px: Option<f32>,
        extra_bottom_px: Option<f32>,
    ) -> u32 {
        let heights = self.config.heights_px_to_mm(heights_px);
        let extras = Extras::from_px(
            extra_top_px.unwrap_or(0.0),
            extra_bottom_px.unwrap_or(0.0),
            self.config.dpi,
        );
        let pages = paginate_by_heights_with_extras(&heights, &self.config, extras);
        self.store(&pages)
    }

    /// Chunk rows into pages of `per_page`; values below 1 are treated as 1
    #[wasm_bindgen(js_name = paginateFixed)]
    pub fn paginate_fixed(&mut self, length: u32, per_page: i32) -> u32 {
        let pages = paginate_fixed(length as usize, clamp_page_size(per_page as i64));
        self.store(&pages)
    }

    /// Run a tagged JSON job; the job carries its own config
    #[wasm_bindgen(js_name = runJob)]
    pub fn run_job(&mut self, job_json: &str) -> Result<u32, JsValue> {
        let pages = PaginationJob::from_json(job_json)
            .and_then(|job| job.run())
            .map_err(to_js_error)?;
        Ok(self.store(&pages))
    }

    /// Copy of the flat page buffer
    #[wasm_bindgen(js_name = getPages)]
    pub fn get_pages(&self) -> Uint32Array {
        Uint32Array::from(self.buffer.as_slice())
    }

    #[wasm_bindgen(js_name = getBufferPtr)]
    pub fn get_buffer_ptr(&self) -> u32 {
        self.buffer.u32_ptr()
    }

    #[wasm_bindgen(js_name = getBufferLen)]
    pub fn get_buffer_len(&self) -> u32 {
        self.buffer.u32_len()
    }

    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&self) -> u32 {
        self.buffer.page_count()
    }

    /// Usable row height per page in millimetres
    #[wasm_bindgen(js_name = getUsableHeightMm)]
    pub fn get_usable_height_mm(&self) -> f32 {
        self.config.usable_height_mm()
    }
}

impl WasmPager {
    fn store(&mut self, pages: &Pages) -> u32 {
        self.buffer.write_pages(pages);
        self.buffer.page_count()
    }

    pub fn buffer(&self) -> &PageBuffer {
        &self.buffer
    }
}

impl Default for WasmPager {
    fn default() -> Self {
        Self::new()
    }
}
