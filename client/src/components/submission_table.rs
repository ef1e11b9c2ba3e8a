//! Submission list table with page selection and sortable headers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Checkboxes write straight into the controller's `SelectionSet`, which only
//! knows the rendered page, so a refresh can never leave a hidden id selected.
//! Clicking a row (outside its checkbox) selects it for the detail panel.

#[cfg(test)]
#[path = "submission_table_test.rs"]
mod submission_table_test;

use leptos::prelude::*;
use workflow::controller::ListController;
use workflow::model::Submission;
use workflow::preview::BadgeTone;
use workflow::query::{ListQueryState, SortDir};
use workflow::selection::MasterState;

/// Arrow shown next to the active sort column.
pub fn sort_indicator(query: &ListQueryState, key: &str) -> &'static str {
    match (query.sort_key() == Some(key), query.sort_dir()) {
        (false, _) => "",
        (true, SortDir::Asc) => " ▲",
        (true, SortDir::Desc) => " ▼",
    }
}

/// `(checked, indeterminate)` for the master checkbox.
pub fn master_flags(state: MasterState) -> (bool, bool) {
    match state {
        MasterState::Unchecked => (false, false),
        MasterState::Indeterminate => (false, true),
        MasterState::Checked => (true, false),
    }
}

/// Rows of the current page. Compared by the table's memo, so selection
/// changes that leave the items untouched do not rebuild the rows.
pub fn page_rows(list: &ListController<Submission>) -> Vec<Submission> {
    list.items().to_vec()
}

/// Short date for the table cell. Values without a time part are shown as-is.
pub fn short_date(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => r.get(..10).unwrap_or(r).to_owned(),
        None => "—".to_owned(),
    }
}

#[component]
fn SortHeader(
    list: RwSignal<ListController<Submission>>,
    sort_key: &'static str,
    label: &'static str,
    on_change: Callback<()>,
) -> impl IntoView {
    view! {
        <th
            class="submission-table__sortable"
            on:click=move |_| {
                list.update(|c| c.toggle_sort(sort_key));
                on_change.run(());
            }
        >
            {label}
            {move || list.with(|c| sort_indicator(c.query(), sort_key))}
        </th>
    }
}

/// Table of the current page.
#[component]
pub fn SubmissionTable(
    list: RwSignal<ListController<Submission>>,
    on_select: Callback<String>,
    on_change: Callback<()>,
) -> impl IntoView {
    // Checkbox toggles change the controller but not the rows.
    let rows = Memo::new(move |_| list.with(page_rows));
    let master = move || list.with(|c| master_flags(c.selection().master_state()));
    let on_master = move |_| {
        list.update(|c| {
            let selection = c.selection_mut();
            if selection.master_state() == MasterState::Checked {
                selection.clear_visible();
            } else {
                selection.select_all_visible();
            }
        });
    };

    view! {
        <table class="submission-table">
            <thead>
                <tr>
                    <th class="submission-table__check">
                        <input
                            type="checkbox"
                            aria-label="Select all on this page"
                            prop:checked=move || master().0
                            prop:indeterminate=move || master().1
                            on:change=on_master
                        />
                    </th>
                    <SortHeader list=list sort_key="title" label="Title" on_change=on_change/>
                    <th>"Category"</th>
                    <SortHeader list=list sort_key="status" label="Status" on_change=on_change/>
                    <SortHeader list=list sort_key="submitted_at" label="Submitted" on_change=on_change/>
                </tr>
            </thead>
            <tbody>
                <Show when=move || rows.with(Vec::is_empty)>
                    <tr>
                        <td colspan="5" class="submission-table__empty">
                            {move || if list.with(ListController::is_loading) { "Loading..." } else { "No results" }}
                        </td>
                    </tr>
                </Show>
                {move || {
                    rows.get()
                        .into_iter()
                        .map(|item| {
                            let id = item.id.clone();
                            let row_id = id.clone();
                            let check_id = id.clone();
                            let select_id = id.clone();
                            let tone = BadgeTone::for_status(item.status);
                            view! {
                                <tr
                                    class="submission-table__row"
                                    class=(
                                        "submission-table__row--active",
                                        move || list.with(|c| c.selected_id() == Some(row_id.as_str())),
                                    )
                                    on:click=move |_| on_select.run(select_id.clone())
                                >
                                    <td class="submission-table__check">
                                        <input
                                            type="checkbox"
                                            aria-label="Select row"
                                            prop:checked=move || list.with(|c| c.selection().is_selected(&id))
                                            on:click=move |ev| ev.stop_propagation()
                                            on:change=move |ev| {
                                                let checked = event_target_checked(&ev);
                                                list.update(|c| {
                                                    c.selection_mut().toggle(&check_id, checked);
                                                });
                                            }
                                        />
                                    </td>
                                    <td>{item.title.clone()}</td>
                                    <td>{item.category.clone().unwrap_or_default()}</td>
                                    <td>
                                        <span class=tone.css_class()>{item.status.label()}</span>
                                    </td>
                                    <td>{short_date(item.submitted_at.as_deref())}</td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}
