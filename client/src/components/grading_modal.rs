//! Grading modal: one score row per criterion, live aggregates, draft
//! persistence and sequential submission.
//!
//! SYSTEM CONTEXT
//! ==============
//! All scoring rules live in `workflow::grading::GradingForm`; this component
//! only forwards DOM events into it. The draft is written to `localStorage`
//! on every change through [`BrowserStore`].
//!
//! ACCESSIBILITY
//! =============
//! Opening remembers the focused element and moves focus into the modal.
//! Tab/Shift+Tab cycle inside it, Escape closes, and closing restores focus.

#[cfg(test)]
#[path = "grading_modal_test.rs"]
mod grading_modal_test;

use leptos::prelude::*;
use workflow::api::{GradingApi, Resource};
use workflow::config::ClientConfig;
use workflow::error::ValidationError;
use workflow::grading::{
    FocusAction, GradingError, GradingForm, GradingStats, ModalFocus, ScoreField, StepDir, Validity, format_score,
};

use crate::net::http::HttpApi;
use crate::state::toast::{ToastKind, ToastState, notify};
use crate::state::ui::UiState;
use crate::util::dom::{active_element_id, focus_by_id, focus_nth_within, focusable_count, focused_index_within};
use crate::util::storage::BrowserStore;

const MODAL_ID: &str = "grading-modal";

/// Icon next to a score input.
pub fn validity_icon(validity: Validity) -> &'static str {
    match validity {
        Validity::Valid => "✓",
        Validity::Invalid => "✕",
        Validity::Empty => "",
    }
}

/// Inline width style for a fill fraction.
pub fn fill_style(fraction: f64) -> String {
    format!("width: {:.1}%", (fraction.clamp(0.0, 1.0) * 100.0))
}

/// Short visible summary next to the aggregate bar.
pub fn summary_text(stats: &GradingStats) -> String {
    format!("{}/{} scored · average {:.2}", stats.filled, stats.criteria, stats.average)
}

/// Map an arrow key onto a step direction.
pub fn arrow_step(key: &str) -> Option<StepDir> {
    match key {
        "ArrowUp" => Some(StepDir::Up),
        "ArrowDown" => Some(StepDir::Down),
        _ => None,
    }
}

fn read_field<R>(form: RwSignal<Option<GradingForm>>, id: &str, read: impl FnOnce(&ScoreField) -> R) -> Option<R> {
    form.with(|f| f.as_ref().and_then(|f| f.field(id)).map(read))
}

#[component]
fn ScoreRow(form: RwSignal<Option<GradingForm>>, criterion_id: String, flagged: RwSignal<Vec<String>>) -> impl IntoView {
    let store = BrowserStore;
    let id = StoredValue::new(criterion_id);
    let input_id = format!("score-{}", id.get_value());
    let label_for = input_id.clone();

    let criterion = read_field(form, &id.get_value(), |f| f.criterion().clone());
    let Some(criterion) = criterion else {
        return ().into_any();
    };
    let (min, max) = (criterion.min_score, criterion.max_score);
    let (min_attr, max_attr) = (format_score(min), format_score(max));

    let edit = move |apply: &dyn Fn(&mut GradingForm, &str)| {
        let key = id.get_value();
        form.update(|f| {
            if let Some(f) = f.as_mut() {
                apply(f, &key);
            }
        });
        flagged.update(|list| list.retain(|flag| *flag != key));
    };

    view! {
        <div
            class="score-row"
            class=("score-row--flagged", move || flagged.with(|list| list.contains(&id.get_value())))
        >
            <label class="score-row__label" for=label_for>
                {criterion.criteria.clone()}
                <span class="score-row__range">{format!(" ({}–{})", format_score(min), format_score(max))}</span>
            </label>
            {criterion.description.clone().map(|text| view! { <p class="score-row__description">{text}</p> })}
            <div class="score-row__inputs">
                <input
                    id=input_id
                    class="score-row__number"
                    type="number"
                    min=min_attr.clone()
                    max=max_attr.clone()
                    step="1"
                    prop:value=move || read_field(form, &id.get_value(), |f| f.raw().to_owned()).unwrap_or_default()
                    on:input=move |ev| {
                        let raw = event_target_value(&ev);
                        edit(&|f, key| f.set_input(&store, key, &raw));
                    }
                    on:change=move |_| edit(&|f, key| f.commit(&store, key))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if let Some(dir) = arrow_step(&ev.key()) {
                            ev.prevent_default();
                            edit(&|f, key| f.step(&store, key, dir));
                        }
                    }
                />
                <input
                    class="score-row__slider"
                    type="range"
                    min=min_attr
                    max=max_attr
                    step="1"
                    prop:value=move || format_score(read_field(form, &id.get_value(), ScoreField::slider_value).unwrap_or(min))
                    on:input=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse::<f64>() {
                            edit(&|f, key| f.set_slider(&store, key, value));
                        }
                    }
                />
                <span class="score-row__validity" aria-hidden="true">
                    {move || read_field(form, &id.get_value(), |f| validity_icon(f.validity())).unwrap_or_default()}
                </span>
            </div>
            <div class="score-row__progress">
                <div
                    class="score-row__progress-fill"
                    style=move || fill_style(read_field(form, &id.get_value(), ScoreField::progress).unwrap_or(0.0))
                ></div>
            </div>
            <button
                class="btn btn--link score-row__comment-toggle"
                on:click=move |_| {
                    let key = id.get_value();
                    form.update(|f| {
                        if let Some(f) = f.as_mut() {
                            f.toggle_comment(&key);
                        }
                    });
                }
            >
                "Comment"
            </button>
            <Show when=move || read_field(form, &id.get_value(), ScoreField::comment_open).unwrap_or(false)>
                <textarea
                    class="score-row__comment"
                    prop:value=move || read_field(form, &id.get_value(), |f| f.comment().to_owned()).unwrap_or_default()
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        edit(&|f, key| f.set_comment(&store, key, &text));
                    }
                ></textarea>
            </Show>
        </div>
    }
    .into_any()
}

/// Modal for scoring one submission. `on_close` receives `true` after a successful submit.
#[component]
pub fn GradingModal(resource: Resource, entity_id: String, on_close: Callback<bool>) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let api = StoredValue::new(HttpApi::new(&config));
    let entity_id = StoredValue::new(entity_id);

    let form = RwSignal::new(None::<GradingForm>);
    let flagged = RwSignal::new(Vec::<String>::new());
    let submitting = RwSignal::new(false);
    let focus = RwSignal::new(ModalFocus::default());

    focus.update(|f| {
        f.open(active_element_id());
    });

    leptos::task::spawn_local(async move {
        let api = api.get_value();
        ui.update(UiState::begin);
        let criteria = api.fetch_criteria(resource).await;
        ui.update(UiState::end);
        match criteria {
            Ok(criteria) => {
                form.set(Some(GradingForm::build(resource, &entity_id.get_value(), criteria, &BrowserStore)));
                focus_nth_within(MODAL_ID, 0);
            }
            Err(error) => notify(toasts, ToastKind::Error, format!("Could not load grading criteria: {error}")),
        }
    });

    let close = move |submitted: bool| {
        if let Some(Some(restore)) = focus.try_update(ModalFocus::close) {
            focus_by_id(&restore);
        }
        on_close.run(submitted);
    };

    // Clicks move focus without a key event, so read the real position first.
    let sync_focus = move || {
        if let Some(index) = focused_index_within(MODAL_ID) {
            focus.update(|f| f.focused(index));
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        sync_focus();
        let count = focusable_count(MODAL_ID);
        match focus.try_update(|f| f.on_key(&ev.key(), ev.shift_key(), count)) {
            Some(FocusAction::Focus(index)) => {
                ev.prevent_default();
                focus_nth_within(MODAL_ID, index);
            }
            Some(FocusAction::Close) => {
                ev.prevent_default();
                close(false);
            }
            Some(FocusAction::Pass) | None => {}
        }
    };

    let criterion_ids = Memo::new(move |_| {
        form.with(|f| f.as_ref().map(|f| f.fields().iter().map(|x| x.id().to_owned()).collect::<Vec<_>>()))
            .unwrap_or_default()
    });
    let stats = Memo::new(move |_| form.with(|f| f.as_ref().map(GradingForm::aggregate)).unwrap_or_default());

    let on_submit = move |_| {
        let Some(current) = form.get_untracked() else {
            return;
        };
        if let Err(ValidationError::ScoresOutOfRange { criteria }) = current.validate() {
            notify(toasts, ToastKind::Warning, format!("{} score(s) are missing or outside their range.", criteria.len()));
            if let Some(first) = criteria.first() {
                focus_by_id(&format!("score-{first}"));
            }
            flagged.set(criteria);
            return;
        }
        submitting.set(true);
        ui.update(UiState::begin);
        leptos::task::spawn_local(async move {
            let api = api.get_value();
            let result = current.submit(&api, &BrowserStore).await;
            ui.update(UiState::end);
            submitting.set(false);
            match result {
                Ok(count) => {
                    notify(toasts, ToastKind::Success, format!("Submitted {count} score(s); submission accepted."));
                    close(true);
                }
                Err(GradingError::Invalid(error)) => notify(toasts, ToastKind::Warning, error.to_string()),
                Err(GradingError::Api(error)) => notify(toasts, ToastKind::Error, error.to_string()),
            }
        });
    };

    let on_reset = move |_| {
        form.update(|f| {
            if let Some(f) = f.as_mut() {
                f.reset(&BrowserStore);
            }
        });
        flagged.set(Vec::new());
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| close(false)>
            <div
                id=MODAL_ID
                class="dialog grading-modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby="grading-modal-title"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                on:focusin=move |_| sync_focus()
            >
                <div class="grading-modal__header">
                    <h2 id="grading-modal-title">{move || format!("Grade {} #{}", resource.noun(), entity_id.get_value())}</h2>
                    <button class="grading-modal__close" title="Close" on:click=move |_| close(false)>
                        "✕"
                    </button>
                </div>
                <div class="grading-modal__aggregate">
                    <div class="grading-modal__bar">
                        <div class="grading-modal__bar-fill" style=move || fill_style(stats.get().fill_ratio)></div>
                    </div>
                    <span>{move || summary_text(&stats.get())}</span>
                    <span class="sr-only" aria-live="polite">{move || stats.get().live_text()}</span>
                </div>
                <Show
                    when=move || form.with(Option::is_some)
                    fallback=|| view! { <p class="grading-modal__loading">"Loading criteria..."</p> }
                >
                    <div class="grading-modal__rows">
                        {move || {
                            criterion_ids
                                .get()
                                .into_iter()
                                .map(|criterion_id| view! { <ScoreRow form=form criterion_id=criterion_id flagged=flagged/> })
                                .collect_view()
                        }}
                    </div>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=on_reset disabled=move || submitting.get()>
                        "Reset"
                    </button>
                    <button class="btn btn--primary" on:click=on_submit disabled=move || submitting.get()>
                        {move || if submitting.get() { "Submitting..." } else { "Submit grading" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
