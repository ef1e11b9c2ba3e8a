use super::*;

fn page(ids: &[&str]) -> SelectionSet {
    let mut set = SelectionSet::new();
    set.sync_visible(ids.iter().map(|id| (*id).to_owned()));
    set
}

#[test]
fn toggle_only_applies_to_rendered_ids() {
    let mut set = page(&["a", "b"]);
    assert!(set.toggle("a", true));
    assert!(!set.toggle("zzz", true));
    assert_eq!(set.ids(), vec!["a"]);
    assert!(set.toggle("a", false));
    assert!(set.is_empty());
}

#[test]
fn master_state_tracks_ratio() {
    let mut set = page(&["a", "b", "c"]);
    assert_eq!(set.master_state(), MasterState::Unchecked);
    set.toggle("b", true);
    assert_eq!(set.master_state(), MasterState::Indeterminate);
    set.select_all_visible();
    assert_eq!(set.master_state(), MasterState::Checked);
    set.clear_visible();
    assert_eq!(set.master_state(), MasterState::Unchecked);
}

#[test]
fn master_state_of_empty_page_is_unchecked() {
    assert_eq!(page(&[]).master_state(), MasterState::Unchecked);
}

#[test]
fn invert_flips_each_visible_id() {
    let mut set = page(&["a", "b", "c"]);
    set.toggle("a", true);
    set.invert_visible();
    assert_eq!(set.ids(), vec!["b", "c"]);
}

#[test]
fn sync_visible_drops_ids_not_rendered() {
    let mut set = page(&["a", "b", "c"]);
    set.select_all_visible();
    set.sync_visible(["b".to_owned(), "d".to_owned()]);
    assert_eq!(set.ids(), vec!["b"]);
    assert!(!set.is_selected("a"));
    for id in set.ids() {
        assert!(set.visible().contains(&id));
    }
}

#[test]
fn ids_follow_rendered_order() {
    let mut set = page(&["c", "a", "b"]);
    set.toggle("b", true);
    set.toggle("c", true);
    assert_eq!(set.ids(), vec!["c", "b"]);
}

#[test]
fn remove_all_drops_only_given_ids() {
    let mut set = page(&["a", "b", "c"]);
    set.select_all_visible();
    set.remove_all(&["a".to_owned(), "c".to_owned()]);
    assert_eq!(set.ids(), vec!["b"]);
    assert_eq!(set.counter_text(), "1 of 3 selected");
}

#[test]
fn dual_selection_holds_one_of_each() {
    let mut dual: DualSelection<String, String> = DualSelection::default();
    dual.select_primary("abs-1".to_owned());
    dual.select_primary("abs-2".to_owned());
    dual.select_secondary("ver-1".to_owned());
    assert_eq!(dual.primary().map(String::as_str), Some("abs-2"));
    assert_eq!(dual.secondary().map(String::as_str), Some("ver-1"));
    dual.clear_secondary();
    assert!(dual.secondary().is_none());
    assert!(dual.primary().is_some());
}
