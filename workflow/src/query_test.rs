use super::*;

fn state_on_page(page: u32) -> ListQueryState {
    let mut state = ListQueryState::default();
    state.set_page(page);
    state
}

#[test]
fn default_starts_on_first_page_with_smallest_size() {
    let state = ListQueryState::default();
    assert_eq!(state.page(), 1);
    assert_eq!(state.page_size().get(), 10);
    assert_eq!(state.sort_key(), None);
    assert_eq!(state.sort_dir(), SortDir::Asc);
}

#[test]
fn page_size_only_accepts_fixed_set() {
    assert!(PageSize::try_from(20).is_ok());
    assert!(PageSize::try_from(50).is_ok());
    assert_eq!(PageSize::try_from(25), Err(25));
}

#[test]
fn filter_query_and_size_changes_reset_page() {
    let mut state = state_on_page(4);
    state.set_filter("ACCEPTED");
    assert_eq!(state.page(), 1);

    state.set_page(3);
    state.set_query("  malaria  ");
    assert_eq!(state.page(), 1);
    assert_eq!(state.query(), "malaria");

    state.set_page(3);
    state.set_page_size(PageSize::try_from(50).unwrap());
    assert_eq!(state.page(), 1);
}

#[test]
fn page_change_does_not_touch_filters() {
    let mut state = ListQueryState::default();
    state.set_filter("PENDING");
    state.set_query("x");
    state.next_page(5);
    assert_eq!(state.page(), 2);
    assert_eq!(state.filter(), "PENDING");
    assert_eq!(state.query(), "x");
}

#[test]
fn paging_stays_within_bounds() {
    let mut state = ListQueryState::default();
    state.prev_page();
    assert_eq!(state.page(), 1);
    state.next_page(2);
    state.next_page(2);
    state.next_page(2);
    assert_eq!(state.page(), 2);
    state.set_page(0);
    assert_eq!(state.page(), 1);
}

#[test]
fn clamp_pulls_page_back_into_range() {
    let mut state = state_on_page(9);
    assert!(state.clamp(3));
    assert_eq!(state.page(), 3);
    assert!(!state.clamp(3));
    assert!(state.clamp(0));
    assert_eq!(state.page(), 1);
}

#[test]
fn toggle_sort_flips_active_key_and_resets_new_key() {
    let mut state = ListQueryState::default();
    state.toggle_sort("title");
    assert_eq!(state.sort_key(), Some("title"));
    assert_eq!(state.sort_dir(), SortDir::Asc);

    state.toggle_sort("title");
    assert_eq!(state.sort_dir(), SortDir::Desc);

    state.toggle_sort("created_at");
    assert_eq!(state.sort_key(), Some("created_at"));
    assert_eq!(state.sort_dir(), SortDir::Asc);
}

#[test]
fn query_pairs_omit_empty_values() {
    let state = ListQueryState::default();
    assert_eq!(
        state.to_query_pairs("status"),
        vec![("page".to_owned(), "1".to_owned()), ("page_size".to_owned(), "10".to_owned())]
    );
}

#[test]
fn query_pairs_use_given_filter_param() {
    let mut state = ListQueryState::default();
    state.set_query("heart");
    state.set_filter("unassigned");
    state.toggle_sort("title");
    state.toggle_sort("title");
    let pairs = state.to_query_pairs("verifiers");
    assert!(pairs.contains(&("q".to_owned(), "heart".to_owned())));
    assert!(pairs.contains(&("verifiers".to_owned(), "unassigned".to_owned())));
    assert!(pairs.contains(&("sort_by".to_owned(), "title".to_owned())));
    assert!(pairs.contains(&("sort_dir".to_owned(), "desc".to_owned())));
}
