//! Review queue for one resource: table, bulk toolbar, detail panel, grading.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted at `/abstracts` and `/best-papers`. The list is fetched on mount
//! and after every control change or mutation. Selecting a row fills the
//! detail panel and starts the PDF preview for that row.

use leptos::prelude::*;
use workflow::api::Resource;
use workflow::bulk::{self, Transition};
use workflow::config::ClientConfig;
use workflow::controller::ListController;
use workflow::model::Submission;
use workflow::preview::{DetailSummary, PdfPreviewState};

use crate::components::bulk_toolbar::BulkToolbar;
use crate::components::detail_panel::DetailPanel;
use crate::components::grading_modal::GradingModal;
use crate::components::list_controls::{ListControls, Pager, STATUS_FILTERS};
use crate::components::pdf_preview::spawn_pdf_preview;
use crate::components::submission_table::SubmissionTable;
use crate::net::http::HttpApi;
use crate::pages::list_binding::{Chrome, spawn_refresh};
use crate::state::toast::{ToastKind, notify};
use crate::state::ui::UiState;
use crate::util::dom::confirm;

/// Queue page for abstracts or best papers.
#[component]
pub fn SubmissionsPage(resource: Resource) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let chrome = Chrome::from_context();
    let api = StoredValue::new(HttpApi::new(&config));

    let list = RwSignal::new(ListController::<Submission>::new(config.default_page_size));
    let summary = RwSignal::new(None::<DetailSummary>);
    let pdf = RwSignal::new(PdfPreviewState::<String>::Idle);
    let running = RwSignal::new(false);
    let grading = RwSignal::new(None::<String>);

    let select = move |id: String| {
        let mut picked = None;
        list.update(|c| {
            c.select(&id, |item, ctx| {
                let detail = DetailSummary::from_submission(item);
                ctx.set_details(detail.rows());
                picked = Some(detail);
            });
        });
        let Some(detail) = picked else {
            return;
        };
        if detail.has_pdf {
            let still_current = move |id: &str| list.with_untracked(|c| c.selected_id() == Some(id));
            spawn_pdf_preview(api.get_value(), resource, detail.id.clone(), pdf, still_current);
        } else {
            pdf.set(PdfPreviewState::Idle);
        }
        summary.set(Some(detail));
    };

    let refresh = move || {
        let source = api.with_value(|a| a.list_source::<Submission>(a.endpoints().list(resource), "status"));
        spawn_refresh(list, source, chrome, select);
    };

    Effect::new(move || refresh());

    let on_change = Callback::new(move |()| refresh());
    let on_select = Callback::new(select);
    let on_grade = Callback::new(move |id: String| grading.set(Some(id)));
    let on_grading_closed = Callback::new(move |submitted: bool| {
        grading.set(None);
        if submitted {
            refresh();
        }
    });

    let on_transition = Callback::new(move |transition: Transition| {
        let noun = resource.noun();
        let count = list.with_untracked(|c| c.selection().len());
        if count == 0 {
            notify(chrome.toasts, ToastKind::Warning, format!("Select at least one {noun} first."));
            return;
        }
        if !confirm(&transition.confirm_prompt(count, noun)) {
            return;
        }

        let mut selection = list.with_untracked(|c| c.selection().clone());
        running.set(true);
        chrome.ui.update(UiState::begin);
        leptos::task::spawn_local(async move {
            let api = api.get_value();
            let result = bulk::transition(&api, resource, &mut selection, transition).await;
            chrome.ui.update(UiState::end);
            running.set(false);
            match result {
                Ok(report) => {
                    list.update(|c| *c.selection_mut() = selection);
                    let kind = if report.is_success() { ToastKind::Success } else { ToastKind::Error };
                    notify(chrome.toasts, kind, report.message(transition, noun));
                    if let Some(notice) = report.notice(noun) {
                        notify(chrome.toasts, ToastKind::Warning, notice);
                    }
                    refresh();
                }
                Err(error) => notify(chrome.toasts, ToastKind::Warning, error.to_string()),
            }
        });
    });

    view! {
        <div class="submissions-page">
            <section class="submissions-page__list">
                <h1>{match resource {
                    Resource::Abstracts => "Abstracts",
                    Resource::BestPapers => "Best papers",
                }}</h1>
                <ListControls list=list filters=STATUS_FILTERS on_change=on_change placeholder="Search title or author"/>
                <BulkToolbar list=list running=running on_transition=on_transition/>
                <SubmissionTable list=list on_select=on_select on_change=on_change/>
                <Pager list=list on_change=on_change/>
            </section>
            <DetailPanel summary=summary pdf=pdf on_grade=on_grade/>
            {move || {
                grading
                    .get()
                    .map(|entity_id| {
                        view! { <GradingModal resource=resource entity_id=entity_id on_close=on_grading_closed/> }
                    })
            }}
        </div>
    }
}
