//! Toast notifications.
//!
//! Toasts are the single surface for validation failures, API errors and
//! bulk-action summaries. Each carries a stable id so timers can dismiss the
//! right one after newer toasts arrive.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;

/// Milliseconds a toast stays up before auto-dismissal.
pub const TOAST_TTL_MS: u32 = 5000;

/// Cap on simultaneously visible toasts; the oldest drop first.
pub const MAX_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Info => "toast toast--info",
            Self::Warning => "toast toast--warning",
            Self::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub items: Vec<Toast>,
}

impl ToastState {
    /// Append a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.items.push(Toast { id: id.clone(), kind, message: message.into() });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: &str) {
        self.items.retain(|toast| toast.id != id);
    }
}

/// Show a toast and schedule its dismissal.
pub fn notify(toasts: RwSignal<ToastState>, kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    match kind {
        ToastKind::Error | ToastKind::Warning => leptos::logging::warn!("{message}"),
        ToastKind::Success | ToastKind::Info => leptos::logging::log!("{message}"),
    }
    let mut id = String::new();
    toasts.update(|state| id = state.push(kind, message));

    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_TTL_MS).await;
            toasts.update(|state| state.dismiss(&id));
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = id;
    }
}
