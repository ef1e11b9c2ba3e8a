//! Selection counter and bulk accept/reject controls.

use leptos::prelude::*;
use workflow::bulk::Transition;
use workflow::controller::ListController;
use workflow::model::Submission;

/// Toolbar above the submission table.
#[component]
pub fn BulkToolbar(
    list: RwSignal<ListController<Submission>>,
    running: RwSignal<bool>,
    on_transition: Callback<Transition>,
) -> impl IntoView {
    let none_selected = move || list.with(|c| c.selection().is_empty());

    view! {
        <div class="bulk-toolbar">
            <span class="bulk-toolbar__count">{move || list.with(|c| c.selection().counter_text())}</span>
            <button class="btn" on:click=move |_| list.update(|c| c.selection_mut().select_all_visible())>
                "Select page"
            </button>
            <button class="btn" on:click=move |_| list.update(|c| c.selection_mut().invert_visible())>
                "Invert"
            </button>
            <button class="btn" on:click=move |_| list.update(|c| c.selection_mut().clear_visible())>
                "Clear"
            </button>
            <span class="bulk-toolbar__spacer"></span>
            <button
                class="btn btn--success"
                disabled=move || none_selected() || running.get()
                on:click=move |_| on_transition.run(Transition::Accept)
            >
                "Accept selected"
            </button>
            <button
                class="btn btn--danger"
                disabled=move || none_selected() || running.get()
                on:click=move |_| on_transition.run(Transition::Reject)
            >
                "Reject selected"
            </button>
        </div>
    }
}
