use super::*;
use workflow::envelope::ListPage;
use workflow::query::PageSize;

#[test]
fn sort_indicator_marks_active_column() {
    let mut query = ListQueryState::new(PageSize::default());
    assert_eq!(sort_indicator(&query, "title"), "");
    query.toggle_sort("title");
    let first = sort_indicator(&query, "title");
    query.toggle_sort("title");
    let second = sort_indicator(&query, "title");
    assert_ne!(first, second);
    assert!(!first.is_empty() && !second.is_empty());
    assert_eq!(sort_indicator(&query, "status"), "");
}

#[test]
fn master_flags_map_tristate() {
    assert_eq!(master_flags(MasterState::Unchecked), (false, false));
    assert_eq!(master_flags(MasterState::Indeterminate), (false, true));
    assert_eq!(master_flags(MasterState::Checked), (true, false));
}

#[test]
fn short_date_trims_timestamp() {
    assert_eq!(short_date(Some("2024-03-01T10:00:00Z")), "2024-03-01");
    assert_eq!(short_date(Some("2024")), "2024");
    assert_eq!(short_date(Some("  ")), "—");
    assert_eq!(short_date(None), "—");
}

#[test]
fn selection_changes_leave_page_rows_equal() {
    let mut list = ListController::<Submission>::new(PageSize::default());
    let ticket = list.begin_refresh();
    let items = ["1", "2"].map(|id| Submission { id: id.to_owned(), ..Submission::default() }).to_vec();
    list.finish_refresh(ticket, Ok(ListPage { items, total: 2, total_pages: 1, ..ListPage::default() }));
    let before = page_rows(&list);

    list.selection_mut().toggle("1", true);
    list.selection_mut().invert_visible();

    assert_eq!(page_rows(&list), before);
    assert_eq!(before.len(), 2);
}
