//! Verifier assignment screen: submissions on the left, verifiers on the
//! right, batched assign/unassign between them.
//!
//! SYSTEM CONTEXT
//! ==============
//! The submission list filters on `verifiers=assigned|unassigned`. The
//! verifier list is single-select and feeds the secondary half of a
//! `DualSelection`; bulk actions read it at click time.

#[cfg(test)]
#[path = "assign_test.rs"]
mod assign_test;

use leptos::prelude::*;
use workflow::api::{AssignmentApi, Resource};
use workflow::bulk::{self, LinkAction};
use workflow::config::ClientConfig;
use workflow::controller::ListController;
use workflow::model::{Submission, Verifier};
use workflow::selection::DualSelection;

use crate::components::list_controls::{ASSIGNMENT_FILTERS, FilterOption, ListControls, Pager};
use crate::components::submission_table::SubmissionTable;
use crate::net::http::HttpApi;
use crate::pages::list_binding::{Chrome, spawn_refresh};
use crate::state::toast::{ToastKind, notify};
use crate::state::ui::UiState;

const VERIFIER_FILTERS: &[FilterOption] = &[FilterOption { value: "", label: "All verifiers" }];

/// Whether `verifier_id` is already linked to `submission`.
pub fn is_linked(submission: &Submission, verifier_id: &str) -> bool {
    submission.verifiers.iter().any(|v| v.id == verifier_id)
}

/// Label of a verifier row: name plus current load.
pub fn verifier_label(verifier: &Verifier) -> String {
    let name = if verifier.name.trim().is_empty() { verifier.id.as_str() } else { verifier.name.as_str() };
    format!("{name} ({} assigned)", verifier.assigned_count)
}

/// Action bar text for the chosen verifier.
pub fn verifier_status(verifier: Option<&Verifier>) -> String {
    verifier.map_or_else(|| "No verifier selected".to_owned(), |v| format!("Verifier: {}", v.name))
}

#[component]
fn VerifierList(
    verifiers: RwSignal<ListController<Verifier>>,
    dual: RwSignal<DualSelection<Submission, Verifier>>,
    on_change: Callback<()>,
) -> impl IntoView {
    let chosen_id = move || dual.with(|d| d.secondary().map(|v| v.id.clone()));

    view! {
        <section class="assign-page__verifiers">
            <h2>"Verifiers"</h2>
            <Show when=move || dual.with(|d| d.secondary().is_some())>
                <button class="btn btn--link" on:click=move |_| dual.update(DualSelection::clear_secondary)>
                    "Clear verifier"
                </button>
            </Show>
            <ListControls list=verifiers filters=VERIFIER_FILTERS on_change=on_change placeholder="Search verifiers"/>
            <ul class="verifier-list" role="listbox">
                {move || {
                    verifiers
                        .with(|c| c.items().to_vec())
                        .into_iter()
                        .map(|verifier| {
                            let id = verifier.id.clone();
                            let label = verifier_label(&verifier);
                            let email = verifier.email.clone().unwrap_or_default();
                            view! {
                                <li
                                    class="verifier-list__item"
                                    class=("verifier-list__item--active", move || chosen_id().as_deref() == Some(id.as_str()))
                                    role="option"
                                    on:click=move |_| dual.update(|d| d.select_secondary(verifier.clone()))
                                >
                                    <span>{label}</span>
                                    <span class="verifier-list__email">{email}</span>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <Pager list=verifiers on_change=on_change/>
        </section>
    }
}

/// Assign/unassign submissions to verifiers.
#[component]
pub fn AssignPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let chrome = Chrome::from_context();
    let api = StoredValue::new(HttpApi::new(&config));

    let resource = RwSignal::new(Resource::Abstracts);
    let submissions = RwSignal::new(ListController::<Submission>::new(config.default_page_size));
    let verifiers = RwSignal::new(ListController::<Verifier>::new(config.default_page_size));
    let dual = RwSignal::new(DualSelection::<Submission, Verifier>::default());
    let running = RwSignal::new(false);

    let select_submission = move |id: String| {
        let mut picked = None;
        submissions.update(|c| {
            c.select(&id, |item, _| picked = Some(item.clone()));
        });
        if let Some(item) = picked {
            dual.update(|d| d.select_primary(item));
        }
    };

    let refresh_submissions = move || {
        let resource = resource.get_untracked();
        let source = api.with_value(|a| a.list_source::<Submission>(a.endpoints().list(resource), "verifiers"));
        spawn_refresh(submissions, source, chrome, select_submission);
    };
    let refresh_verifiers = move || {
        let source = api.with_value(|a| a.list_source::<Verifier>(a.endpoints().verifiers(), "status"));
        spawn_refresh(verifiers, source, chrome, |_| {});
    };

    Effect::new(move || {
        refresh_submissions();
        refresh_verifiers();
    });

    let on_submissions_change = Callback::new(move |()| refresh_submissions());
    let on_verifiers_change = Callback::new(move |()| refresh_verifiers());
    let on_select = Callback::new(select_submission);

    let switch_resource = move |next: Resource| {
        if resource.get_untracked() == next {
            return;
        }
        resource.set(next);
        submissions.update(|c| {
            c.clear_selected();
            c.selection_mut().clear_visible();
        });
        dual.update(DualSelection::clear_primary);
        refresh_submissions();
    };

    let run_link = move |action: LinkAction| {
        let resource = resource.get_untracked();
        let verifier = dual.with_untracked(|d| d.secondary().cloned());
        let mut selection = submissions.with_untracked(|c| c.selection().clone());
        running.set(true);
        chrome.ui.update(UiState::begin);
        leptos::task::spawn_local(async move {
            let api = api.get_value();
            let result = bulk::link(&api, resource, &mut selection, verifier.as_ref(), action).await;
            chrome.ui.update(UiState::end);
            running.set(false);
            match result {
                Ok(report) => {
                    submissions.update(|c| *c.selection_mut() = selection);
                    notify(chrome.toasts, ToastKind::Success, report.message(resource.noun()));
                    refresh_submissions();
                    refresh_verifiers();
                }
                Err(error) => notify(chrome.toasts, ToastKind::Warning, error.to_string()),
            }
        });
    };

    let run_single = move |link: bool, verifier_id: String| {
        let resource = resource.get_untracked();
        let Some(submission_id) = dual.with_untracked(|d| d.primary().map(|s| s.id.clone())) else {
            return;
        };
        chrome.ui.update(UiState::begin);
        leptos::task::spawn_local(async move {
            let api = api.get_value();
            let result = if link {
                api.link_verifier(resource, &submission_id, &verifier_id).await
            } else {
                api.unlink_verifier(resource, &submission_id, &verifier_id).await
            };
            chrome.ui.update(UiState::end);
            match result {
                Ok(()) => {
                    let verb = if link { "Linked" } else { "Unlinked" };
                    notify(chrome.toasts, ToastKind::Success, format!("{verb} verifier {verifier_id}"));
                    dual.update(DualSelection::clear_primary);
                    refresh_submissions();
                    refresh_verifiers();
                }
                Err(error) => notify(chrome.toasts, ToastKind::Error, error.to_string()),
            }
        });
    };

    // Missing selections are refused by `bulk::link` with a warning toast.
    let bulk_disabled = move || running.get();

    view! {
        <div class="assign-page">
            <section class="assign-page__submissions">
                <div class="assign-page__tabs">
                    <button
                        class="btn"
                        class=("btn--primary", move || resource.get() == Resource::Abstracts)
                        on:click=move |_| switch_resource(Resource::Abstracts)
                    >
                        "Abstracts"
                    </button>
                    <button
                        class="btn"
                        class=("btn--primary", move || resource.get() == Resource::BestPapers)
                        on:click=move |_| switch_resource(Resource::BestPapers)
                    >
                        "Best papers"
                    </button>
                </div>
                <ListControls
                    list=submissions
                    filters=ASSIGNMENT_FILTERS
                    on_change=on_submissions_change
                    placeholder="Search title or author"
                />
                <SubmissionTable list=submissions on_select=on_select on_change=on_submissions_change/>
                <Pager list=submissions on_change=on_submissions_change/>
            </section>
            <div class="assign-page__actions">
                <span>{move || submissions.with(|c| c.selection().counter_text())}</span>
                <span>
                    {move || {
                        dual.with(|d| {
                            verifier_status(d.secondary())
                        })
                    }}
                </span>
                <button class="btn btn--primary" disabled=bulk_disabled on:click=move |_| run_link(LinkAction::Assign)>
                    "Assign →"
                </button>
                <button class="btn" disabled=bulk_disabled on:click=move |_| run_link(LinkAction::Unassign)>
                    "← Unassign"
                </button>
                {move || {
                    dual.get()
                        .primary()
                        .map(|submission| {
                            let linked = submission
                                .verifiers
                                .iter()
                                .map(|v| {
                                    let verifier_id = v.id.clone();
                                    view! {
                                        <li>
                                            {v.name.clone()}
                                            <button
                                                class="btn btn--link"
                                                on:click=move |_| run_single(false, verifier_id.clone())
                                            >
                                                "Unlink"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view();
                            let candidate = dual
                                .get_untracked()
                                .secondary()
                                .filter(|v| !is_linked(submission, &v.id))
                                .map(|v| {
                                    let verifier_id = v.id.clone();
                                    view! {
                                        <button class="btn" on:click=move |_| run_single(true, verifier_id.clone())>
                                            {format!("Link {}", v.name)}
                                        </button>
                                    }
                                });
                            view! {
                                <div class="assign-page__linked">
                                    <h3>{submission.title.clone()}</h3>
                                    <ul>{linked}</ul>
                                    {candidate}
                                </div>
                            }
                        })
                }}
            </div>
            <VerifierList verifiers=verifiers dual=dual on_change=on_verifiers_change/>
        </div>
    }
}
