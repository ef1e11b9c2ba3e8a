//! Search box, filter select, page-size select and pager for a list panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every control edits the page's `ListController` and then asks the page to
//! refresh. Filter, search and page-size changes reset to page 1 inside the
//! controller, not here.

use leptos::prelude::*;
use workflow::controller::ListController;
use workflow::query::{PAGE_SIZES, PageSize};

/// One `<option>` of the filter select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Status filter shared by the submission queues.
pub const STATUS_FILTERS: &[FilterOption] = &[
    FilterOption { value: "", label: "All statuses" },
    FilterOption { value: "PENDING", label: "Pending" },
    FilterOption { value: "UNDER_REVIEW", label: "Under review" },
    FilterOption { value: "ACCEPTED", label: "Accepted" },
    FilterOption { value: "REJECTED", label: "Rejected" },
    FilterOption { value: "DRAFT", label: "Draft" },
];

/// Assignment filter used on the verifier assignment screen.
pub const ASSIGNMENT_FILTERS: &[FilterOption] = &[
    FilterOption { value: "", label: "All" },
    FilterOption { value: "unassigned", label: "Unassigned" },
    FilterOption { value: "assigned", label: "Assigned" },
];

/// Search, filter and page size controls.
#[component]
pub fn ListControls<T>(
    list: RwSignal<ListController<T>>,
    filters: &'static [FilterOption],
    on_change: Callback<()>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let on_search = move |ev| {
        let value = event_target_value(&ev);
        list.update(|c| c.set_search(&value));
        on_change.run(());
    };
    let on_filter = move |ev| {
        let value = event_target_value(&ev);
        list.update(|c| c.set_filter(&value));
        on_change.run(());
    };
    let on_page_size = move |ev| {
        let size = event_target_value(&ev).parse::<u32>().ok().and_then(|v| PageSize::try_from(v).ok());
        if let Some(size) = size {
            list.update(|c| c.set_page_size(size));
            on_change.run(());
        }
    };

    view! {
        <div class="list-controls">
            <input
                class="list-controls__search"
                type="search"
                placeholder=placeholder.unwrap_or("Search...")
                prop:value=move || list.with(|c| c.query().query().to_owned())
                on:change=on_search
            />
            <select class="list-controls__filter" on:change=on_filter>
                {filters
                    .iter()
                    .map(|option| {
                        let value = option.value;
                        view! {
                            <option value=value prop:selected=move || list.with(|c| c.query().filter() == value)>
                                {option.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <select class="list-controls__page-size" on:change=on_page_size>
                {PAGE_SIZES
                    .iter()
                    .map(|size| {
                        let size = *size;
                        view! {
                            <option
                                value=size.to_string()
                                prop:selected=move || list.with(|c| c.query().page_size().get() == size)
                            >
                                {format!("{size} / page")}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

/// Prev/next buttons, "Page X of Y" and the stats line.
#[component]
pub fn Pager<T>(list: RwSignal<ListController<T>>, on_change: Callback<()>) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    view! {
        <div class="pager">
            <span class="pager__stats">{move || list.with(|c| c.stats().to_owned())}</span>
            <span class="pager__spacer"></span>
            <button
                class="btn pager__prev"
                disabled=move || !list.with(ListController::has_prev)
                on:click=move |_| {
                    list.update(ListController::prev_page);
                    on_change.run(());
                }
            >
                "‹ Prev"
            </button>
            <span class="pager__text">{move || list.with(ListController::pager_text)}</span>
            <button
                class="btn pager__next"
                disabled=move || !list.with(ListController::has_next)
                on:click=move |_| {
                    list.update(ListController::next_page);
                    on_change.run(());
                }
            >
                "Next ›"
            </button>
        </div>
    }
}
