//! Author rows of the submission wizard.
//!
//! Presenter and corresponding flags are exclusive across rows; the wizard
//! enforces that, this component only reports checkbox changes.

#[cfg(test)]
#[path = "author_editor_test.rs"]
mod author_editor_test;

use leptos::prelude::*;
use workflow::model::Author;
use workflow::wizard::{AuthorRole, Wizard, is_valid_email};

/// Trimmed text, or `None` when blank.
pub fn optional_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Whether the email cell should be flagged. Blank emails are allowed.
pub fn email_flagged(email: Option<&str>) -> bool {
    email.is_some_and(|e| !e.trim().is_empty() && !is_valid_email(e))
}

fn read_author<R>(wizard: RwSignal<Wizard>, index: usize, read: impl FnOnce(&Author) -> R) -> Option<R> {
    wizard.with(|w| w.draft().authors.get(index).map(read))
}

fn edit_author(wizard: RwSignal<Wizard>, index: usize, apply: impl FnOnce(&mut Author)) {
    wizard.update(|w| {
        if let Some(author) = w.draft_mut().authors.get_mut(index) {
            apply(author);
        }
    });
}

#[component]
fn AuthorRow(wizard: RwSignal<Wizard>, index: usize) -> impl IntoView {
    let row_id = format!("author-{index}");
    let number = index + 1;

    view! {
        <fieldset id=row_id class="author-row">
            <legend>{format!("Author {number}")}</legend>
            <input
                class="author-row__name"
                type="text"
                placeholder="Full name"
                prop:value=move || read_author(wizard, index, |a| a.name.clone()).unwrap_or_default()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    edit_author(wizard, index, |a| a.name = value);
                }
            />
            <input
                class="author-row__email"
                class=("author-row__email--invalid", move || {
                    read_author(wizard, index, |a| email_flagged(a.email.as_deref())).unwrap_or(false)
                })
                type="email"
                placeholder="Email"
                prop:value=move || read_author(wizard, index, |a| a.email.clone()).flatten().unwrap_or_default()
                on:input=move |ev| {
                    let value = optional_text(&event_target_value(&ev));
                    edit_author(wizard, index, |a| a.email = value);
                }
            />
            <input
                class="author-row__affiliation"
                type="text"
                placeholder="Affiliation"
                prop:value=move || read_author(wizard, index, |a| a.affiliation.clone()).flatten().unwrap_or_default()
                on:input=move |ev| {
                    let value = optional_text(&event_target_value(&ev));
                    edit_author(wizard, index, |a| a.affiliation = value);
                }
            />
            <label class="author-row__role">
                <input
                    type="checkbox"
                    prop:checked=move || read_author(wizard, index, |a| a.is_presenter).unwrap_or(false)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        wizard.update(|w| w.set_role(index, AuthorRole::Presenter, checked));
                    }
                />
                "Presenter"
            </label>
            <label class="author-row__role">
                <input
                    type="checkbox"
                    prop:checked=move || read_author(wizard, index, |a| a.is_corresponding).unwrap_or(false)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        wizard.update(|w| w.set_role(index, AuthorRole::Corresponding, checked));
                    }
                />
                "Corresponding"
            </label>
            <button
                class="btn btn--link author-row__remove"
                title="Remove author"
                disabled=move || wizard.with(|w| w.draft().authors.len() <= 1)
                on:click=move |_| wizard.update(|w| w.remove_author(index))
            >
                "Remove"
            </button>
        </fieldset>
    }
}

/// Editable author list with add/remove.
#[component]
pub fn AuthorEditor(wizard: RwSignal<Wizard>) -> impl IntoView {
    let row_count = Memo::new(move |_| wizard.with(|w| w.draft().authors.len()));

    view! {
        <div id="authors" class="author-editor">
            {move || (0..row_count.get()).map(|index| view! { <AuthorRow wizard=wizard index=index/> }).collect_view()}
            <button class="btn author-editor__add" on:click=move |_| wizard.update(Wizard::add_author)>
                "+ Add author"
            </button>
        </div>
    }
}
