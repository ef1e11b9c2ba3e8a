//! # review-desk
//!
//! Leptos + WASM admin UI for reviewing research submissions: abstract and
//! best-paper queues, verifier assignment, the submission wizard, and the
//! grading modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! All rules live in the `workflow` crate. This crate binds them to signals,
//! talks to the REST API with `gloo-net`, persists drafts in `localStorage`,
//! and renders PDFs through a PDF.js bridge. Browser-only code is gated on
//! the `csr` feature so the crate still builds and tests natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and the panic hook, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
