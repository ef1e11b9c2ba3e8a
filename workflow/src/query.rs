//! List query state: page, page size, sort, filter and free-text search.
//!
//! INVARIANTS
//! ==========
//! - `page >= 1` always, and `page <= total_pages` after [`ListQueryState::clamp`].
//! - Changing filter, query or page size puts the list back on page 1.
//! - Exactly one sort key is active at a time.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use serde::{Deserialize, Serialize};

/// Page sizes offered by the page-size segmented control.
pub const PAGE_SIZES: [u32; 3] = [10, 20, 50];

/// Sort direction sent as `sort_dir`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// A page size from the fixed set in [`PAGE_SIZES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(PAGE_SIZES[0])
    }
}

impl TryFrom<u32> for PageSize {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if PAGE_SIZES.contains(&value) { Ok(Self(value)) } else { Err(value) }
    }
}

/// Query state owned by one list controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQueryState {
    page: u32,
    page_size: PageSize,
    sort_key: Option<String>,
    sort_dir: SortDir,
    filter: String,
    query: String,
}

impl Default for ListQueryState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl ListQueryState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page: 1,
            page_size,
            sort_key: None,
            sort_dir: SortDir::Asc,
            filter: String::new(),
            query: String::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn sort_dir(&self) -> SortDir {
        self.sort_dir
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Set the status/linkage filter. Always returns to page 1.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.page = 1;
    }

    /// Set the free-text search. Always returns to page 1.
    pub fn set_query(&mut self, query: &str) {
        query.trim().clone_into(&mut self.query);
        self.page = 1;
    }

    /// Set the page size. Always returns to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Jump to `page`; values below 1 become 1. Upper bound is applied by [`Self::clamp`].
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Advance one page without passing `total_pages`.
    pub fn next_page(&mut self, total_pages: u32) {
        self.page = (self.page + 1).min(total_pages.max(1));
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Clamp the page into `[1, total_pages]`. Returns true when it moved.
    pub fn clamp(&mut self, total_pages: u32) -> bool {
        let clamped = self.page.clamp(1, total_pages.max(1));
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }

    /// Sort-button click: the active key flips direction, a new key starts ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort_key.as_deref() == Some(key) {
            self.sort_dir = self.sort_dir.flipped();
        } else {
            self.sort_key = Some(key.to_owned());
            self.sort_dir = SortDir::Asc;
        }
    }

    /// Encode as URL query pairs. `filter_param` is `status` or `verifiers`
    /// depending on the list. Empty search/filter/sort values are omitted.
    pub fn to_query_pairs(&self, filter_param: &str) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(6);
        if !self.query.is_empty() {
            pairs.push(("q".to_owned(), self.query.clone()));
        }
        if !self.filter.is_empty() {
            pairs.push((filter_param.to_owned(), self.filter.clone()));
        }
        pairs.push(("page".to_owned(), self.page.to_string()));
        pairs.push(("page_size".to_owned(), self.page_size.get().to_string()));
        if let Some(key) = &self.sort_key {
            pairs.push(("sort_by".to_owned(), key.clone()));
            pairs.push(("sort_dir".to_owned(), self.sort_dir.as_str().to_owned()));
        }
        pairs
    }
}
