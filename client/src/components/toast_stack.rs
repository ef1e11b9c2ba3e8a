//! Toast stack pinned to the bottom-right corner.

use leptos::prelude::*;

use crate::state::toast::ToastState;

/// Renders every live toast with a dismiss button.
#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .items
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id.clone();
                        view! {
                            <div class=toast.kind.css_class()>
                                <span class="toast__message">{toast.message}</span>
                                <button
                                    class="toast__close"
                                    title="Dismiss"
                                    on:click=move |_| toasts.update(|t| t.dismiss(&id))
                                >
                                    "✕"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
