//! Page and filter bookkeeping shared by every list view.
//!
//! A [`PageController`] owns the [`PageState`] of one list view, turns
//! page/filter requests into fetches against a [`PageSource`] and folds the
//! normalized responses back into the state.
//!
//! [`PageSource`]: crate::source::PageSource

use std::collections::BTreeMap;

use serde::Serialize;

use crate::source::FetchError;

mod controller;
mod normalize;
mod window;

pub use controller::{FetchTicket, PageController, StalePolicy};
pub use normalize::{COLLECTION_ALIASES, NormalizedPage, PageMeta, normalize_response};
pub use window::{WindowShape, item_range};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_PRESETS: [usize; 4] = [10, 20, 50, 100];

/// Query keys owned by the controller; filters never override them.
pub const RESERVED_KEYS: [&str; 2] = ["page", "limit"];

/// Filter key to filter value. An empty value means "not filtered".
pub type Filters = BTreeMap<String, String>;

/// Parameter bag handed to the page source for one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageParams {
    pub page: usize,
    pub limit: usize,
    pub filters: Filters,
}

impl PageParams {
    /// Flattens the bag into query pairs: `page`, `limit`, then every
    /// non-empty filter in key order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        pairs.extend(
            self.filters
                .iter()
                .filter(|(key, value)| {
                    !value.trim().is_empty() && !RESERVED_KEYS.contains(&key.as_str())
                })
                .map(|(key, value)| (key.clone(), value.trim().to_string())),
        );
        pairs
    }
}

/// State of one paginated list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageState<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub filters: Filters,
    pub loading: bool,
    #[serde(skip)]
    pub error: Option<FetchError>,
}

impl<T> PageState<T> {
    pub fn new(filters: Filters, page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
            total_items: 0,
            filters,
            loading: false,
            error: None,
        }
    }

    pub fn params(&self) -> PageParams {
        PageParams {
            page: self.current_page,
            limit: self.page_size,
            filters: self.filters.clone(),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page links for the pagination control.
    pub fn pages(&self) -> Vec<Option<usize>> {
        WindowShape::default().pages(self.total_pages, self.current_page)
    }

    /// "Showing X–Y of Z" positions for the status line.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        item_range(self.current_page, self.page_size, self.total_items)
    }

    pub(crate) fn apply(&mut self, page: NormalizedPage<T>) {
        let mut items = page.items;
        if items.len() > self.page_size {
            log::warn!(
                "backend returned {} records for a page of {}; truncating",
                items.len(),
                self.page_size
            );
            items.truncate(self.page_size);
        }

        self.items = items;
        self.total_items = page.meta.total;
        self.total_pages = page.meta.pages.max(1);
        self.current_page = page.meta.current.clamp(1, self.total_pages);
        self.loading = false;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, error: FetchError) {
        self.items.clear();
        self.error = Some(error);
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_skip_empty_and_reserved_filters() {
        let mut filters = Filters::new();
        filters.insert("status".into(), "pending".into());
        filters.insert("search".into(), "  ".into());
        filters.insert("page".into(), "9".into());
        filters.insert("category".into(), " chips ".into());

        let params = PageParams {
            page: 2,
            limit: 20,
            filters,
        };

        assert_eq!(
            params.query_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "20".to_string()),
                ("category".to_string(), "chips".to_string()),
                ("status".to_string(), "pending".to_string()),
            ]
        );
    }

    #[test]
    fn apply_clamps_and_truncates() {
        let mut state: PageState<u32> = PageState::new(Filters::new(), 2);
        state.loading = true;

        state.apply(NormalizedPage {
            items: vec![1, 2, 3],
            meta: PageMeta {
                current: 9,
                pages: 3,
                total: 6,
            },
        });

        assert_eq!(state.items, vec![1, 2]);
        assert_eq!(state.current_page, 3);
        assert_eq!(state.total_pages, 3);
        assert!(!state.loading);
    }

    #[test]
    fn fail_clears_items() {
        let mut state: PageState<u32> = PageState::new(Filters::new(), 10);
        state.items = vec![1, 2];
        state.loading = true;

        state.fail(FetchError::Transport("connection refused".into()));

        assert!(state.items.is_empty());
        assert!(!state.loading);
        assert!(matches!(state.error, Some(FetchError::Transport(_))));
    }
}
