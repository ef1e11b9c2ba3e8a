//! PDF attachment zone of the submission wizard: drag-and-drop or file picker.
//!
//! Both paths go through `Wizard::attach_pdf`, so type and size rules are
//! identical. The browser `File` handle is kept in a local signal next to the
//! wizard because it cannot cross threads.

#[cfg(test)]
#[path = "pdf_drop_zone_test.rs"]
mod pdf_drop_zone_test;

use leptos::prelude::*;
use workflow::wizard::{PdfAttachment, Wizard};

use crate::net::http::FileHandle;
use crate::state::toast::{ToastKind, ToastState, notify};

/// Human-readable file size.
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes >= KB * KB {
        format!("{:.1} MB", bytes / (KB * KB))
    } else if bytes >= KB {
        format!("{:.0} KB", bytes / KB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(feature = "csr")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn attachment_of(file: &FileHandle) -> PdfAttachment {
    PdfAttachment { name: file.name(), mime: file.type_(), size_bytes: file.size().max(0.0) as u64 }
}

#[cfg(not(feature = "csr"))]
fn attachment_of(_file: &FileHandle) -> PdfAttachment {
    PdfAttachment { name: String::new(), mime: String::new(), size_bytes: 0 }
}

fn dropped_file(ev: &leptos::ev::DragEvent) -> Option<FileHandle> {
    #[cfg(feature = "csr")]
    {
        ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0))
    }

    #[cfg(not(feature = "csr"))]
    {
        let _ = ev;
        None
    }
}

fn picked_file(ev: &leptos::ev::Event) -> Option<FileHandle> {
    #[cfg(feature = "csr")]
    {
        let input = event_target::<web_sys::HtmlInputElement>(ev);
        let file = input.files().and_then(|files| files.get(0));
        // Allow re-picking the same file after a rejection.
        input.set_value("");
        file
    }

    #[cfg(not(feature = "csr"))]
    {
        let _ = ev;
        None
    }
}

/// Drop zone plus hidden file input. `file` holds the accepted browser handle.
#[component]
pub fn PdfDropZone(wizard: RwSignal<Wizard>, file: RwSignal<Option<FileHandle>, LocalStorage>) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let dragover = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let accept = move |handle: FileHandle| {
        let meta = attachment_of(&handle);
        match wizard.try_update(|w| w.attach_pdf(meta)) {
            Some(Ok(())) => {
                file.set(Some(handle));
                error.set(None);
            }
            Some(Err(rejected)) => {
                file.set(None);
                let message = rejected.to_string();
                notify(toasts, ToastKind::Warning, message.clone());
                error.set(Some(message));
            }
            None => {}
        }
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        dragover.set(false);
        if let Some(handle) = dropped_file(&ev) {
            accept(handle);
        }
    };

    let on_pick = move |ev: leptos::ev::Event| {
        if let Some(handle) = picked_file(&ev) {
            accept(handle);
        }
    };

    let on_clear = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        wizard.update(Wizard::clear_pdf);
        file.set(None);
        error.set(None);
    };

    let attachment = move || wizard.with(|w| w.draft().attachment.clone());
    let max_mb = move || wizard.with(Wizard::max_pdf_mb);

    view! {
        <div
            id="attachment"
            class="pdf-drop-zone"
            class=("pdf-drop-zone--over", move || dragover.get())
            class=("pdf-drop-zone--error", move || error.with(Option::is_some))
            tabindex="0"
            on:dragover=move |ev: leptos::ev::DragEvent| {
                ev.prevent_default();
                dragover.set(true);
            }
            on:dragleave=move |_| dragover.set(false)
            on:drop=on_drop
            on:click=move |_| {
                if let Some(input) = input_ref.get() {
                    input.click();
                }
            }
        >
            <input node_ref=input_ref type="file" accept="application/pdf,.pdf" hidden=true on:change=on_pick/>
            {move || match attachment() {
                Some(file) => {
                    view! {
                        <div class="pdf-drop-zone__file">
                            <span class="pdf-drop-zone__name">{file.name.clone()}</span>
                            <span class="pdf-drop-zone__size">{format_size(file.size_bytes)}</span>
                            <button class="btn btn--link" on:click=on_clear>
                                "Remove"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <p class="pdf-drop-zone__hint">
                            {format!("Drop a PDF here or click to choose one (max {} MB). Optional.", max_mb())}
                        </p>
                    }
                        .into_any()
                }
            }}
            {move || error.get().map(|message| view! { <p class="pdf-drop-zone__error" role="alert">{message}</p> })}
        </div>
    }
}
