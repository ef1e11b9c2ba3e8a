//! Small DOM helpers: blocking confirm, focus management, navigation.
//!
//! Outside the browser every helper is a no-op (and `confirm` declines) so
//! destructive actions never run without a real user answer.

/// Blocking `window.confirm`. Declines when no window is available.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window().and_then(|w| w.confirm_with_message(message).ok()).unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        false
    }
}

/// Id of the element that currently has focus, if it has one.
pub fn active_element_id() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let id = web_sys::window()?.document()?.active_element()?.id();
        (!id.is_empty()).then_some(id)
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Move focus to the element with `id`, if it exists and is focusable.
pub fn focus_by_id(id: &str) {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(element) = element {
            let _ = element.focus();
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = id;
    }
}

/// Focus the `index`-th focusable control inside the element with `container_id`.
pub fn focus_nth_within(container_id: &str, index: usize) {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let Some(container) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.get_element_by_id(container_id))
        else {
            return;
        };
        let Ok(nodes) = container.query_selector_all(FOCUSABLE_SELECTOR) else {
            return;
        };
        let Ok(index) = u32::try_from(index) else {
            return;
        };
        if let Some(element) = nodes.item(index).and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok()) {
            let _ = element.focus();
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (container_id, index);
    }
}

/// Position of the focused element among the focusable controls of `container_id`.
pub fn focused_index_within(container_id: &str) -> Option<usize> {
    #[cfg(feature = "csr")]
    {
        let document = web_sys::window()?.document()?;
        let active = document.active_element()?;
        let nodes = document.get_element_by_id(container_id)?.query_selector_all(FOCUSABLE_SELECTOR).ok()?;
        (0..nodes.length()).position(|i| nodes.item(i).is_some_and(|node| active.is_same_node(Some(&node))))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = container_id;
        None
    }
}

/// Number of focusable controls inside the element with `container_id`.
pub fn focusable_count(container_id: &str) -> usize {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .and_then(|c| c.query_selector_all(FOCUSABLE_SELECTOR).ok())
            .map_or(0, |nodes| nodes.length() as usize)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = container_id;
        0
    }
}

#[cfg(feature = "csr")]
const FOCUSABLE_SELECTOR: &str =
    "button:not([disabled]), input:not([disabled]), textarea:not([disabled]), select:not([disabled]), [tabindex]:not([tabindex='-1'])";

/// Navigate the whole page to `href` after `delay_ms`.
pub fn redirect_after(href: &str, delay_ms: u32) {
    #[cfg(feature = "csr")]
    {
        let href = href.to_owned();
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(delay_ms).await;
            if let Some(w) = web_sys::window() {
                let _ = w.location().set_href(&href);
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (href, delay_ms);
    }
}
