use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use super::*;

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: String,
    title: String,
}

impl Entity for Row {
    fn id(&self) -> &str {
        &self.id
    }
}

fn row(id: &str) -> Row {
    Row { id: id.to_owned(), title: format!("Title {id}") }
}

fn page_of(ids: &[&str], total: u64, total_pages: u32) -> ListPage<Row> {
    ListPage { items: ids.iter().map(|id| row(id)).collect(), total, total_pages, ..ListPage::default() }
}

struct FakeSource {
    responses: RefCell<VecDeque<Result<ListPage<Row>, ApiError>>>,
    seen_pages: RefCell<Vec<u32>>,
}

impl FakeSource {
    fn new(responses: Vec<Result<ListPage<Row>, ApiError>>) -> Self {
        Self { responses: RefCell::new(responses.into()), seen_pages: RefCell::new(Vec::new()) }
    }
}

#[async_trait(?Send)]
impl PageSource<Row> for FakeSource {
    async fn fetch_page(&self, query: &ListQueryState) -> Result<ListPage<Row>, ApiError> {
        self.seen_pages.borrow_mut().push(query.page());
        self.responses.borrow_mut().pop_front().unwrap_or_else(|| Ok(ListPage::default()))
    }
}

#[tokio::test]
async fn first_refresh_loads_items_and_auto_selects_first() {
    let source = FakeSource::new(vec![Ok(page_of(&["a", "b"], 2, 1))]);
    let mut list = ListController::<Row>::default();

    let outcome = list.refresh(&source).await;

    assert_eq!(outcome, RefreshOutcome::Applied { auto_selected: Some("a".to_owned()), page_clamped: false });
    assert_eq!(list.items().len(), 2);
    assert!(!list.is_loading());
    assert_eq!(list.stats(), "Showing 1–2 of 2");
}

#[tokio::test]
async fn existing_selection_is_not_replaced() {
    let source = FakeSource::new(vec![Ok(page_of(&["a", "b"], 2, 1)), Ok(page_of(&["a", "b"], 2, 1))]);
    let mut list = ListController::<Row>::default();
    list.refresh(&source).await;
    assert!(list.select("b", |_, _| {}));

    let outcome = list.refresh(&source).await;

    assert_eq!(outcome, RefreshOutcome::Applied { auto_selected: None, page_clamped: false });
    assert_eq!(list.selected_id(), Some("b"));
}

#[tokio::test]
async fn failure_keeps_previous_items_and_reports() {
    let source = FakeSource::new(vec![
        Ok(page_of(&["a"], 1, 1)),
        Err(ApiError::from_response(500, r#"{"error":"db down"}"#)),
    ]);
    let mut list = ListController::<Row>::default();
    list.refresh(&source).await;

    let outcome = list.refresh(&source).await;

    assert!(matches!(outcome, RefreshOutcome::Failed(ApiError::Http { status: 500, .. })));
    assert_eq!(list.items().len(), 1);
    assert_eq!(list.stats(), "Failed to load");
    assert_eq!(list.error(), Some("db down"));
    assert!(!list.is_loading());
}

#[test]
fn stale_response_is_dropped() {
    let mut list = ListController::<Row>::default();
    let first = list.begin_refresh();
    let second = list.begin_refresh();

    let stale = list.finish_refresh(first, Ok(page_of(&["old"], 1, 1)));
    assert_eq!(stale, RefreshOutcome::Stale);
    assert!(list.is_loading());

    list.finish_refresh(second, Ok(page_of(&["new"], 1, 1)));
    assert_eq!(list.items()[0].id, "new");
    assert!(!list.is_loading());
}

#[tokio::test]
async fn page_is_clamped_to_total_pages() {
    let source = FakeSource::new(vec![Ok(page_of(&["a"], 12, 5)), Ok(page_of(&[], 3, 1))]);
    let mut list = ListController::<Row>::default();
    list.refresh(&source).await;
    list.next_page();
    list.next_page();
    assert_eq!(list.query().page(), 3);

    let outcome = list.refresh(&source).await;

    assert!(matches!(outcome, RefreshOutcome::Applied { page_clamped: true, .. }));
    assert_eq!(list.query().page(), 1);
    assert!(list.query().page() <= list.total_pages());
    assert_eq!(*source.seen_pages.borrow(), vec![1, 3]);
}

#[tokio::test]
async fn filter_change_resets_to_first_page() {
    let source = FakeSource::new(vec![Ok(page_of(&["a"], 40, 4))]);
    let mut list = ListController::<Row>::default();
    list.refresh(&source).await;
    list.next_page();
    list.set_filter("REJECTED");
    assert_eq!(list.query().page(), 1);
    list.next_page();
    list.set_search("tb");
    assert_eq!(list.query().page(), 1);
}

#[tokio::test]
async fn refresh_prunes_selection_to_rendered_rows() {
    let source = FakeSource::new(vec![Ok(page_of(&["a", "b"], 4, 2)), Ok(page_of(&["c", "d"], 4, 2))]);
    let mut list = ListController::<Row>::default();
    list.refresh(&source).await;
    list.selection_mut().select_all_visible();
    list.next_page();

    list.refresh(&source).await;

    assert!(list.selection().is_empty());
    assert_eq!(list.selection().visible(), ["c".to_owned(), "d".to_owned()]);
}

#[tokio::test]
async fn select_fills_details_through_context() {
    let source = FakeSource::new(vec![Ok(page_of(&["a"], 1, 1))]);
    let mut list = ListController::<Row>::default();
    list.refresh(&source).await;

    let found = list.select("a", |item, ctx| {
        ctx.set_details([("Title", item.title.clone()), ("Id", item.id.clone())]);
    });

    assert!(found);
    assert_eq!(list.details()[0], DetailField { label: "Title".into(), value: "Title a".into() });
    assert!(!list.select("missing", |_, _| {}));
    list.clear_selected();
    assert!(list.details().is_empty());
    assert_eq!(list.selected_id(), None);
}

#[test]
fn pager_flags_follow_bounds() {
    let mut list = ListController::<Row>::default();
    let ticket = list.begin_refresh();
    list.finish_refresh(ticket, Ok(page_of(&["a"], 30, 3)));
    assert!(!list.has_prev());
    assert!(list.has_next());
    list.next_page();
    list.next_page();
    list.next_page();
    assert_eq!(list.pager_text(), "Page 3 of 3");
    assert!(!list.has_next());
}

#[test]
fn stats_text_formats_range() {
    assert_eq!(stats_text(2, 10, 10, 45), "Showing 11–20 of 45");
    assert_eq!(stats_text(1, 10, 0, 0), "No results");
}
