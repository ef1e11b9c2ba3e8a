//! Embedded PDF preview for the detail panel and the wizard's preview step.
//!
//! SYSTEM CONTEXT
//! ==============
//! Bytes come from the authenticated `pdf` endpoint, or from the file the
//! submitter attached, and every page goes through PDF.js concurrently. Any failure replaces only this region with a
//! message; the surrounding panel stays usable.

#[cfg(test)]
#[path = "pdf_preview_test.rs"]
mod pdf_preview_test;

use leptos::prelude::*;
use workflow::api::Resource;
use workflow::error::ApiError;
use workflow::preview::{PdfError, PdfPreviewState, render_all_pages};

use crate::net::http::{FileHandle, HttpApi};
use crate::net::pdf::PdfJsRenderer;

/// Map a download failure onto the preview's error vocabulary.
pub fn fetch_error(error: ApiError) -> PdfError {
    match error {
        ApiError::Http { status: 404, .. } => PdfError::Missing,
        ApiError::Http { status, .. } => PdfError::Fetch(status),
        other => PdfError::Render(other.to_string()),
    }
}

/// Fetch and render `id`'s PDF into `state`.
///
/// `still_current` is checked before writing so a preview for an item the
/// user has already navigated away from is dropped.
pub fn spawn_pdf_preview<F>(
    api: HttpApi,
    resource: Resource,
    id: String,
    state: RwSignal<PdfPreviewState<String>>,
    still_current: F,
) where
    F: Fn(&str) -> bool + 'static,
{
    state.set(PdfPreviewState::Loading);
    leptos::task::spawn_local(async move {
        let result = match api.fetch_pdf(resource, &id).await {
            Ok(bytes) => render_all_pages(&PdfJsRenderer, bytes).await,
            Err(error) => Err(fetch_error(error)),
        };
        if let Err(error) = &result {
            leptos::logging::warn!("pdf preview for {id} failed: {error}");
        }
        if still_current(&id) {
            state.set(PdfPreviewState::from_result(result));
        }
    });
}

/// Read the bytes of a picked or dropped file.
pub async fn read_file_bytes(file: &FileHandle) -> Result<Vec<u8>, PdfError> {
    #[cfg(feature = "csr")]
    {
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| PdfError::Render(format!("could not read {}: {e:?}", file.name())))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = file;
        Err(PdfError::Render("reading files needs a browser".to_owned()))
    }
}

/// Render a not-yet-uploaded attachment into `state`.
///
/// `still_current` is checked before writing, so a preview for a file that was
/// replaced or removed meanwhile is dropped.
pub fn spawn_attached_pdf_preview<F>(file: FileHandle, state: RwSignal<PdfPreviewState<String>>, still_current: F)
where
    F: Fn() -> bool + 'static,
{
    state.set(PdfPreviewState::Loading);
    leptos::task::spawn_local(async move {
        let result = match read_file_bytes(&file).await {
            Ok(bytes) => render_all_pages(&PdfJsRenderer, bytes).await,
            Err(error) => Err(error),
        };
        if let Err(error) = &result {
            leptos::logging::warn!("attachment preview failed: {error}");
        }
        if still_current() {
            state.set(PdfPreviewState::from_result(result));
        }
    });
}

/// Spinner, rendered pages, or an inline error.
#[component]
pub fn PdfPreview(state: RwSignal<PdfPreviewState<String>>) -> impl IntoView {
    view! {
        <div class="pdf-preview">
            {move || match state.get() {
                PdfPreviewState::Idle => ().into_any(),
                PdfPreviewState::Loading => {
                    view! { <div class="pdf-preview__spinner" role="status">"Loading PDF..."</div> }.into_any()
                }
                PdfPreviewState::Rendered { pages } => {
                    view! {
                        <div class="pdf-preview__pages">
                            {pages
                                .into_iter()
                                .enumerate()
                                .map(|(index, src)| {
                                    view! {
                                        <img
                                            class="pdf-preview__page"
                                            src=src
                                            alt=format!("Page {}", index + 1)
                                        />
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
                PdfPreviewState::Failed(error) => {
                    view! { <div class="pdf-preview__error" role="alert">{error.to_string()}</div> }.into_any()
                }
            }}
        </div>
    }
}
