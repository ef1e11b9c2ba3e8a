use super::*;

#[test]
fn push_returns_unique_ids() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Success, "one");
    let b = state.push(ToastKind::Error, "two");
    assert_ne!(a, b);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[1].kind, ToastKind::Error);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Info, "one");
    state.push(ToastKind::Info, "two");
    state.dismiss(&a);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].message, "two");
    state.dismiss("missing");
    assert_eq!(state.items.len(), 1);
}

#[test]
fn oldest_toasts_drop_past_cap() {
    let mut state = ToastState::default();
    for n in 0..MAX_TOASTS + 2 {
        state.push(ToastKind::Info, format!("toast {n}"));
    }
    assert_eq!(state.items.len(), MAX_TOASTS);
    assert_eq!(state.items[0].message, "toast 2");
}

#[test]
fn kind_maps_to_css_modifier() {
    assert_eq!(ToastKind::Error.css_class(), "toast toast--error");
    assert_eq!(ToastKind::Success.css_class(), "toast toast--success");
}
