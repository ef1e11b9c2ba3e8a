//! Generic list controller: query state, fetched page, loading flag, row
//! selection and detail-panel fields for one list panel.
//!
//! DESIGN
//! ======
//! Fetching is split into `begin_refresh` / `finish_refresh` so a UI layer can
//! release its borrow of the controller across the network await. Each refresh
//! carries a generation number; a response for an older generation is dropped
//! so out-of-order replies never overwrite a newer query.
//!
//! On failure the previous items stay on screen, the stats line reads
//! "Failed to load", and the error is kept for the caller's toast.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use serde_json::{Map, Value};

use crate::api::PageSource;
use crate::envelope::ListPage;
use crate::error::ApiError;
use crate::model::Entity;
use crate::query::{ListQueryState, PageSize};
use crate::selection::SelectionSet;

/// One label/value row in the detail side panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

/// Handed to the `on_select` callback so it can fill the side panel.
pub struct DetailContext<'a> {
    fields: &'a mut Vec<DetailField>,
}

impl DetailContext<'_> {
    /// Replace the side-panel rows.
    pub fn set_details<L, V>(&mut self, rows: impl IntoIterator<Item = (L, V)>)
    where
        L: Into<String>,
        V: Into<String>,
    {
        *self.fields = rows.into_iter().map(|(label, value)| DetailField { label: label.into(), value: value.into() }).collect();
    }
}

/// Proof that a refresh was started; hand it back to [`ListController::finish_refresh`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub query: ListQueryState,
}

/// What [`ListController::finish_refresh`] did with a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The page replaced the list.
    Applied {
        /// First item picked because nothing was selected.
        auto_selected: Option<String>,
        /// The requested page was past the end and was clamped; refetch to show it.
        page_clamped: bool,
    },
    /// The fetch failed; the previous items remain.
    Failed(ApiError),
    /// A newer refresh started before this one finished; the response was dropped.
    Stale,
}

/// Paginated, searchable, sortable list state for one entity type.
#[derive(Clone, Debug)]
pub struct ListController<T> {
    query: ListQueryState,
    items: Vec<T>,
    total: u64,
    total_pages: u32,
    meta: Map<String, Value>,
    loading: bool,
    generation: u64,
    selected: Option<String>,
    details: Vec<DetailField>,
    selection: SelectionSet,
    stats: String,
    error: Option<String>,
}

impl<T> Default for ListController<T> {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl<T> ListController<T> {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            query: ListQueryState::new(page_size),
            items: Vec::new(),
            total: 0,
            total_pages: 1,
            meta: Map::new(),
            loading: false,
            generation: 0,
            selected: None,
            details: Vec::new(),
            selection: SelectionSet::new(),
            stats: String::new(),
            error: None,
        }
    }

    pub fn query(&self) -> &ListQueryState {
        &self.query
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> &str {
        &self.stats
    }

    pub fn details(&self) -> &[DetailField] {
        &self.details
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    pub fn has_prev(&self) -> bool {
        self.query.page() > 1
    }

    pub fn has_next(&self) -> bool {
        self.query.page() < self.total_pages
    }

    /// "Page 2 of 5".
    pub fn pager_text(&self) -> String {
        format!("Page {} of {}", self.query.page(), self.total_pages)
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.query.set_filter(filter);
    }

    pub fn set_search(&mut self, query: &str) {
        self.query.set_query(query);
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.query.set_page_size(page_size);
    }

    pub fn toggle_sort(&mut self, key: &str) {
        self.query.toggle_sort(key);
    }

    pub fn next_page(&mut self) {
        self.query.next_page(self.total_pages);
    }

    pub fn prev_page(&mut self) {
        self.query.prev_page();
    }

    /// Mark loading and snapshot the query for the fetch.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        tracing::debug!(generation = self.generation, page = self.query.page(), "list refresh started");
        FetchTicket { generation: self.generation, query: self.query.clone() }
    }

    pub fn clear_selected(&mut self) {
        self.selected = None;
        self.details.clear();
    }
}

impl<T: Entity> ListController<T> {
    /// Apply a fetch result. Loading is cleared unless a newer refresh is in flight.
    pub fn finish_refresh(&mut self, ticket: FetchTicket, result: Result<ListPage<T>, ApiError>) -> RefreshOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(stale = ticket.generation, current = self.generation, "dropping stale list response");
            return RefreshOutcome::Stale;
        }
        self.loading = false;

        let page = match result {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!(%error, "list refresh failed");
                self.error = Some(error.to_string());
                "Failed to load".clone_into(&mut self.stats);
                return RefreshOutcome::Failed(error);
            }
        };

        self.error = None;
        self.items = page.items;
        self.total = page.total;
        self.total_pages = page.total_pages.max(1);
        self.meta = page.meta;
        let page_clamped = self.query.clamp(self.total_pages);
        self.selection.sync_visible(self.items.iter().map(|item| item.id().to_owned()));
        self.stats = stats_text(self.query.page(), self.query.page_size().get(), self.items.len(), self.total);

        let auto_selected = if self.selected.is_none() {
            self.items.first().map(|item| item.id().to_owned())
        } else {
            None
        };
        RefreshOutcome::Applied { auto_selected, page_clamped }
    }

    /// Fetch through `source` and apply the result.
    pub async fn refresh<S>(&mut self, source: &S) -> RefreshOutcome
    where
        S: PageSource<T> + ?Sized,
    {
        let ticket = self.begin_refresh();
        let result = source.fetch_page(&ticket.query).await;
        self.finish_refresh(ticket, result)
    }

    pub fn item(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Row click: make `id` the detail subject and let `on_select` fill the panel.
    /// Returns false when the id is not on the current page.
    pub fn select<F>(&mut self, id: &str, on_select: F) -> bool
    where
        F: FnOnce(&T, &mut DetailContext<'_>),
    {
        let Some(item) = self.items.iter().find(|item| item.id() == id) else {
            return false;
        };
        self.selected = Some(id.to_owned());
        let mut ctx = DetailContext { fields: &mut self.details };
        on_select(item, &mut ctx);
        true
    }
}

/// Stats line under the list: "Showing 11–20 of 45" or "No results".
pub fn stats_text(page: u32, page_size: u32, shown: usize, total: u64) -> String {
    if shown == 0 {
        return "No results".to_owned();
    }
    let start = u64::from(page.saturating_sub(1)) * u64::from(page_size) + 1;
    let end = start + shown as u64 - 1;
    format!("Showing {start}–{end} of {total}")
}
