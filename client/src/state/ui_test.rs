use super::*;

#[test]
fn ui_state_default_is_idle() {
    assert!(!UiState::default().is_busy());
}

#[test]
fn ui_state_stays_busy_until_last_request_ends() {
    let mut state = UiState::default();
    state.begin();
    state.begin();
    state.end();
    assert!(state.is_busy());
    state.end();
    assert!(!state.is_busy());
}

#[test]
fn ui_state_end_without_begin_saturates() {
    let mut state = UiState::default();
    state.end();
    assert!(!state.is_busy());
    state.begin();
    assert!(state.is_busy());
}
