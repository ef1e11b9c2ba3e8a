//! PDF.js renderer behind the `workflow` preview seam.
//!
//! Pages are rendered to PNG data URLs by `js/pdf-bridge.js` and shown as
//! images, so the preview needs no canvas bookkeeping on the Rust side.

use async_trait::async_trait;
use workflow::preview::{PdfError, PdfRenderer};

/// Render scale passed to PDF.js.
pub const RENDER_SCALE: f64 = 1.25;

#[cfg(feature = "csr")]
mod bridge {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(module = "/js/pdf-bridge.js")]
    extern "C" {
        #[wasm_bindgen(js_name = "openPdf", catch)]
        pub async fn open_pdf(bytes: js_sys::Uint8Array) -> Result<JsValue, JsValue>;

        #[wasm_bindgen(js_name = "pageCount")]
        pub fn page_count(doc: &JsValue) -> u32;

        #[wasm_bindgen(js_name = "renderPage", catch)]
        pub async fn render_page(doc: JsValue, number: u32, scale: f64) -> Result<JsValue, JsValue>;
    }
}

/// Classify a thrown PDF.js error by its `name`.
#[cfg(feature = "csr")]
fn classify(error: &wasm_bindgen::JsValue) -> PdfError {
    let field = |key: &str| {
        js_sys::Reflect::get(error, &wasm_bindgen::JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    };
    PdfError::classify(&field("name"), &field("message"))
}

/// PDF.js-backed renderer producing one image data URL per page.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfJsRenderer;

#[cfg(feature = "csr")]
#[async_trait(?Send)]
impl PdfRenderer for PdfJsRenderer {
    type Document = wasm_bindgen::JsValue;
    type Page = String;

    async fn open(&self, bytes: Vec<u8>) -> Result<Self::Document, PdfError> {
        let array = js_sys::Uint8Array::from(bytes.as_slice());
        bridge::open_pdf(array).await.map_err(|e| classify(&e))
    }

    fn page_count(&self, document: &Self::Document) -> u32 {
        bridge::page_count(document)
    }

    async fn render_page(&self, document: &Self::Document, number: u32) -> Result<String, PdfError> {
        let url = bridge::render_page(document.clone(), number, RENDER_SCALE).await.map_err(|e| classify(&e))?;
        url.as_string().ok_or_else(|| PdfError::Render(format!("page {number} produced no image")))
    }
}

#[cfg(not(feature = "csr"))]
#[async_trait(?Send)]
impl PdfRenderer for PdfJsRenderer {
    type Document = ();
    type Page = String;

    async fn open(&self, bytes: Vec<u8>) -> Result<(), PdfError> {
        let _ = bytes;
        Err(PdfError::Render("PDF preview needs a browser".to_owned()))
    }

    fn page_count(&self, _document: &()) -> u32 {
        0
    }

    async fn render_page(&self, _document: &(), number: u32) -> Result<String, PdfError> {
        Err(PdfError::Render(format!("page {number} cannot render outside a browser")))
    }
}
