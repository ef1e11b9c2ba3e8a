//! Signal binding for `ListController`: runs a refresh without holding the
//! controller borrow across the network await.

use leptos::prelude::*;
use workflow::api::PageSource;
use workflow::controller::{ListController, RefreshOutcome};
use workflow::model::Entity;

use crate::state::toast::{ToastKind, ToastState, notify};
use crate::state::ui::UiState;

/// Shared chrome a list refresh reports into.
#[derive(Clone, Copy)]
pub(crate) struct Chrome {
    pub toasts: RwSignal<ToastState>,
    pub ui: RwSignal<UiState>,
}

impl Chrome {
    pub fn from_context() -> Self {
        Self { toasts: expect_context::<RwSignal<ToastState>>(), ui: expect_context::<RwSignal<UiState>>() }
    }
}

/// Begin a refresh, fetch through `source`, then apply the page.
///
/// A clamped page is refetched once more; a first item picked because nothing
/// was selected is handed to `on_auto_select`.
pub(crate) fn spawn_refresh<T, S, F>(list: RwSignal<ListController<T>>, source: S, chrome: Chrome, on_auto_select: F)
where
    T: Entity + Send + Sync + 'static,
    S: PageSource<T> + 'static,
    F: Fn(String) + 'static,
{
    let Some(ticket) = list.try_update(ListController::begin_refresh) else {
        return;
    };
    chrome.ui.update(UiState::begin);
    leptos::task::spawn_local(async move {
        let result = source.fetch_page(&ticket.query).await;
        chrome.ui.update(UiState::end);
        match list.try_update(|c| c.finish_refresh(ticket, result)) {
            Some(RefreshOutcome::Applied { page_clamped: true, .. }) => {
                spawn_refresh(list, source, chrome, on_auto_select);
            }
            Some(RefreshOutcome::Applied { auto_selected: Some(id), .. }) => on_auto_select(id),
            Some(RefreshOutcome::Failed(error)) => {
                notify(chrome.toasts, ToastKind::Error, format!("Failed to load: {error}"));
            }
            _ => {}
        }
    });
}
