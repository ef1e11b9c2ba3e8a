//! Five-step submission wizard: basics, authors, content, PDF, preview.
//!
//! SYSTEM CONTEXT
//! ==============
//! All gating lives in `workflow::wizard::Wizard`; this page renders whichever
//! step is visible and forwards edits. The PDF drop zone stays mounted on
//! every step, and the preview step renders the attached file's pages. A
//! failed gate is toasted and focus moves to the offending field. Final submission redirects to the queue
//! after a short delay; saving a draft stays here.

#[cfg(test)]
#[path = "submit_test.rs"]
mod submit_test;

use leptos::prelude::*;
use workflow::api::SubmissionApi;
use workflow::config::ClientConfig;
use workflow::error::{Field, ValidationError};
use workflow::model::{Category, SectionKind};
use workflow::preview::PdfPreviewState;
use workflow::text::count_words;
use workflow::wizard::{SubmitMode, Wizard, WizardStep};

use crate::components::author_editor::AuthorEditor;
use crate::components::pdf_drop_zone::PdfDropZone;
use crate::components::pdf_preview::{PdfPreview, spawn_attached_pdf_preview};
use crate::net::http::{FileHandle, HttpApi};
use crate::state::toast::{ToastKind, ToastState, notify};
use crate::util::dom::{focus_by_id, redirect_after};

const AFTER_SUBMIT_HREF: &str = "/abstracts";

/// DOM id that receives focus for a validation error.
pub fn field_dom_id(field: Field) -> &'static str {
    match field {
        Field::Title => "title",
        Field::Category => "category",
        Field::Authors => "authors",
        Field::Content => "section-introduction",
        Field::Attachment => "attachment",
        Field::Scores => "grading-modal",
    }
}

/// DOM id of one content textarea.
pub fn section_dom_id(kind: SectionKind) -> String {
    let slug = match kind {
        SectionKind::Introduction => "introduction",
        SectionKind::AimsObjectives => "aims-objectives",
        SectionKind::MaterialsMethods => "materials-methods",
        SectionKind::Results => "results",
        SectionKind::Conclusion => "conclusion",
    };
    format!("section-{slug}")
}

/// Live counter under the content step.
pub fn word_counter_text(words: usize, limit: usize) -> String {
    format!("{words} / {limit} words")
}

/// Attachment line on the preview step.
pub fn attachment_text(name: Option<&str>) -> String {
    name.map_or_else(|| "No PDF attached".to_owned(), |name| format!("Attached: {name}"))
}

/// Button label while a request is in flight.
pub fn submit_label(mode: SubmitMode, sending: Option<SubmitMode>) -> &'static str {
    match (mode, sending == Some(mode)) {
        (SubmitMode::Final, false) => "Submit",
        (SubmitMode::Final, true) => "Submitting...",
        (SubmitMode::Draft, false) => "Save draft",
        (SubmitMode::Draft, true) => "Saving...",
    }
}

fn report_invalid(toasts: RwSignal<ToastState>, error: &ValidationError) {
    notify(toasts, ToastKind::Warning, error.to_string());
    focus_by_id(field_dom_id(error.field()));
}

#[component]
fn StepIndicator(wizard: RwSignal<Wizard>) -> impl IntoView {
    view! {
        <ol class="wizard-steps">
            {WizardStep::ALL
                .into_iter()
                .map(|step| {
                    view! {
                        <li
                            class="wizard-steps__item"
                            class=("wizard-steps__item--active", move || wizard.with(|w| w.step() == step))
                            class=("wizard-steps__item--done", move || wizard.with(|w| w.step().number() > step.number()))
                        >
                            {format!("{}. {}", step.number(), step.title())}
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}

#[component]
fn BasicsStep(wizard: RwSignal<Wizard>, categories: RwSignal<Vec<Category>>) -> impl IntoView {
    let on_category = move |ev| {
        let id = event_target_value(&ev);
        let picked = categories.with(|list| list.iter().find(|c| c.id == id).cloned());
        wizard.update(|w| w.draft_mut().category = picked);
    };

    view! {
        <div class="wizard-step">
            <label for="title">"Title"</label>
            <input
                id="title"
                type="text"
                prop:value=move || wizard.with(|w| w.draft().title.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    wizard.update(|w| w.draft_mut().title = value);
                }
            />
            <span class="wizard-step__hint">
                {move || format!("{} words", wizard.with(|w| count_words(&w.draft().title)))}
            </span>
            <label for="category">"Category"</label>
            <select id="category" on:change=on_category>
                <option value="" prop:selected=move || wizard.with(|w| w.draft().category.is_none())>
                    "Select a category"
                </option>
                {move || {
                    categories
                        .get()
                        .into_iter()
                        .map(|category| {
                            let id = category.id.clone();
                            let selected = move || {
                                wizard.with(|w| w.draft().category.as_ref().is_some_and(|c| c.id == id))
                            };
                            view! {
                                <option value=category.id.clone() prop:selected=selected>
                                    {category.name}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}

#[component]
fn ContentStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    let counter = move || wizard.with(|w| word_counter_text(w.content_word_count(), w.content_word_limit()));
    let over_limit = move || wizard.with(|w| w.content_word_count() > w.content_word_limit());

    view! {
        <div id="content" class="wizard-step">
            {SectionKind::ALL
                .into_iter()
                .map(|kind| {
                    let dom_id = section_dom_id(kind);
                    view! {
                        <label for=dom_id.clone()>{kind.label()}</label>
                        <textarea
                            id=dom_id
                            rows="5"
                            prop:value=move || wizard.with(|w| w.draft().sections.get(kind).to_owned())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                wizard.update(|w| w.draft_mut().sections.set(kind, value));
                            }
                        ></textarea>
                    }
                })
                .collect_view()}
            <p class="wizard-step__counter" class=("wizard-step__counter--over", over_limit) aria-live="polite">
                {counter}
            </p>
        </div>
    }
}

#[component]
fn PreviewStep(wizard: RwSignal<Wizard>, pdf: RwSignal<PdfPreviewState<String>>) -> impl IntoView {
    view! {
        <div class="wizard-step wizard-preview">
            {move || {
                wizard
                    .with(|w| w.preview().cloned())
                    .map(|preview| {
                        view! {
                            <h2>{preview.title}</h2>
                            <p class="wizard-preview__category">{preview.category}</p>
                            <ul class="wizard-preview__authors">
                                {preview
                                    .authors
                                    .into_iter()
                                    .map(|author| {
                                        let contact = [author.email, author.affiliation]
                                            .into_iter()
                                            .flatten()
                                            .collect::<Vec<_>>()
                                            .join(" · ");
                                        view! {
                                            <li>
                                                <strong>{author.name}</strong>
                                                " "
                                                <span>{contact}</span>
                                                {author
                                                    .badges
                                                    .into_iter()
                                                    .map(|badge| view! { <span class="badge badge--info">{badge}</span> })
                                                    .collect_view()}
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                            {preview
                                .sections
                                .into_iter()
                                .map(|(label, html)| {
                                    view! {
                                        <h4>{label}</h4>
                                        <div class="wizard-preview__section" inner_html=html></div>
                                    }
                                })
                                .collect_view()}
                            <p>{format!("{} words", preview.word_count)}</p>
                            <p>{attachment_text(preview.attachment_name.as_deref())}</p>
                            <Show when=move || preview_has_file(wizard)>
                                <PdfPreview state=pdf/>
                            </Show>
                        }
                    })
            }}
        </div>
    }
}

fn preview_has_file(wizard: RwSignal<Wizard>) -> bool {
    wizard.with(|w| w.draft().attachment.is_some())
}

/// New submission wizard.
#[component]
pub fn SubmitPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let api = StoredValue::new(HttpApi::new(&config));
    let redirect_delay_ms = config.redirect_delay_ms;

    let wizard = RwSignal::new(Wizard::new(&config));
    let file = RwSignal::new_local(None::<FileHandle>);
    let categories = RwSignal::new(Vec::<Category>::new());
    let sending = RwSignal::new(None::<SubmitMode>);
    let pdf = RwSignal::new(PdfPreviewState::<String>::Idle);
    let pdf_generation = StoredValue::new(0_u64);

    leptos::task::spawn_local(async move {
        match api.get_value().fetch_categories().await {
            Ok(list) => categories.set(list),
            Err(error) => notify(toasts, ToastKind::Error, format!("Could not load categories: {error}")),
        }
    });

    let on_next = move |_| {
        if let Some(Err(error)) = wizard.try_update(Wizard::next) {
            report_invalid(toasts, &error);
        }
    };
    let on_prev = move |_| {
        wizard.update(|w| {
            w.prev();
        });
    };

    let send = move |mode: SubmitMode| {
        if sending.get_untracked().is_some() {
            return;
        }
        let request = match wizard.with_untracked(|w| w.prepare_submission(mode)) {
            Ok(request) => request,
            Err(error) => {
                report_invalid(toasts, &error);
                return;
            }
        };
        let handle = file.get_untracked();
        sending.set(Some(mode));
        leptos::task::spawn_local(async move {
            let result = api.get_value().submit(&request, handle.as_ref()).await;
            sending.set(None);
            match (result, mode) {
                (Ok(_), SubmitMode::Final) => {
                    notify(toasts, ToastKind::Success, "Submission received. Redirecting...");
                    redirect_after(AFTER_SUBMIT_HREF, redirect_delay_ms);
                }
                (Ok(_), SubmitMode::Draft) => notify(toasts, ToastKind::Success, "Draft saved."),
                (Err(error), _) => notify(toasts, ToastKind::Error, error.to_string()),
            }
        });
    };

    let visible = move |step: WizardStep| wizard.with(|w| w.is_visible(step));
    let busy = move || sending.get().is_some();

    let on_preview = Memo::new(move |_| visible(WizardStep::Preview));
    Effect::new(move || {
        let generation = pdf_generation.get_value() + 1;
        pdf_generation.set_value(generation);
        match (on_preview.get(), file.get()) {
            (true, Some(handle)) => {
                spawn_attached_pdf_preview(handle, pdf, move || pdf_generation.get_value() == generation);
            }
            _ => pdf.set(PdfPreviewState::Idle),
        }
    });

    view! {
        <div class="submit-page">
            <h1>"New submission"</h1>
            <StepIndicator wizard=wizard/>
            <Show when=move || visible(WizardStep::Basics)>
                <BasicsStep wizard=wizard categories=categories/>
            </Show>
            <Show when=move || visible(WizardStep::Authors)>
                <AuthorEditor wizard=wizard/>
            </Show>
            <Show when=move || visible(WizardStep::Content)>
                <ContentStep wizard=wizard/>
            </Show>
            <Show when=move || visible(WizardStep::Attachment)>
                <p class="wizard-step__hint">
                    "Attach the full paper as a PDF. This is optional and can be done from any step."
                </p>
            </Show>
            <Show when=move || visible(WizardStep::Preview)>
                <PreviewStep wizard=wizard pdf=pdf/>
            </Show>
            <PdfDropZone wizard=wizard file=file/>
            <div class="wizard-nav">
                <button
                    class="btn"
                    disabled=move || busy() || wizard.with(|w| w.step().preceding().is_none())
                    on:click=on_prev
                >
                    "Back"
                </button>
                <button class="btn" disabled=busy on:click=move |_| send(SubmitMode::Draft)>
                    {move || submit_label(SubmitMode::Draft, sending.get())}
                </button>
                <Show
                    when=move || visible(WizardStep::Preview)
                    fallback=move || {
                        view! {
                            <button class="btn btn--primary" on:click=on_next>
                                "Next"
                            </button>
                        }
                    }
                >
                    <button class="btn btn--primary" disabled=busy on:click=move |_| send(SubmitMode::Final)>
                        {move || submit_label(SubmitMode::Final, sending.get())}
                    </button>
                </Show>
            </div>
        </div>
    }
}
