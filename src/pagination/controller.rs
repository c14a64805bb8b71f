use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::pagination::{Filters, PageParams, PageState, RESERVED_KEYS, normalize_response};
use crate::source::{FetchError, PageSource};

/// What to do with a response that arrives after a newer fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Only the most recently issued fetch may update the state.
    #[default]
    LatestRequest,
    /// Every response is applied; whichever lands last wins.
    LastWriteWins,
}

/// A fetch that has been issued but not yet completed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a ticket must be executed or completed for the fetch to happen"]
pub struct FetchTicket {
    seq: u64,
    params: PageParams,
}

impl FetchTicket {
    /// Monotonically increasing per controller.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn params(&self) -> &PageParams {
        &self.params
    }
}

/// Drives one list view: holds its [`PageState`], issues fetches to the
/// source and folds the responses back in.
///
/// Every mutator exists in two forms. The `async` form performs the fetch
/// right away. The `request_*` form only updates the state and returns a
/// [`FetchTicket`], which the caller later hands to [`execute`] or to
/// [`complete`] together with a result obtained elsewhere; this is how
/// overlapping fetches are expressed.
///
/// [`execute`]: PageController::execute
/// [`complete`]: PageController::complete
pub struct PageController<S, T = Value> {
    source: S,
    state: PageState<T>,
    initial_filters: Filters,
    policy: StalePolicy,
    issued: u64,
    latest_settled: bool,
}

impl<S, T> PageController<S, T> {
    pub fn new(source: S, initial_filters: Filters, page_size: usize) -> Self {
        Self {
            source,
            state: PageState::new(initial_filters.clone(), page_size),
            initial_filters,
            policy: StalePolicy::default(),
            issued: 0,
            latest_settled: true,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Sequence number of the latest issued fetch (0 before the first one).
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Moves to page `page` (0 is read as 1). Returns `None` when already
    /// there. The page is not clamped here; the response decides.
    pub fn request_page(&mut self, page: usize) -> Option<FetchTicket> {
        let page = page.max(1);
        if page == self.state.current_page {
            return None;
        }
        self.state.current_page = page;
        Some(self.begin())
    }

    /// Changes the page size and goes back to page 1. A size of 0 is
    /// ignored.
    pub fn request_page_size(&mut self, page_size: usize) -> Option<FetchTicket> {
        if page_size == 0 {
            log::warn!("ignoring page size of 0");
            return None;
        }
        self.state.page_size = page_size;
        self.state.current_page = 1;
        Some(self.begin())
    }

    pub fn request_filter(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> FetchTicket {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            log::warn!("filter key `{key}` clashes with a paging parameter and will not be sent");
        }
        self.state.filters.insert(key, value.into());
        self.state.current_page = 1;
        self.begin()
    }

    pub fn request_filters(&mut self, filters: Filters) -> FetchTicket {
        self.state.filters = filters;
        self.state.current_page = 1;
        self.begin()
    }

    /// Restores the filters the controller was created with.
    pub fn request_clear_filters(&mut self) -> FetchTicket {
        self.state.filters = self.initial_filters.clone();
        self.state.current_page = 1;
        self.begin()
    }

    pub fn request_refresh(&mut self) -> FetchTicket {
        self.begin()
    }

    fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        self.latest_settled = false;
        self.state.loading = true;
        self.state.error = None;

        FetchTicket {
            seq: self.issued,
            params: self.state.params(),
        }
    }
}

impl<S, T> PageController<S, T>
where
    S: PageSource,
    T: DeserializeOwned,
{
    /// Applies the outcome of `ticket`'s fetch. Returns whether the state
    /// was updated; under [`StalePolicy::LatestRequest`] responses to
    /// superseded tickets are dropped.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Value, FetchError>) -> bool {
        if ticket.seq != self.issued && self.policy == StalePolicy::LatestRequest {
            log::debug!(
                "dropping response to fetch #{} (latest is #{})",
                ticket.seq,
                self.issued
            );
            return false;
        }

        if ticket.seq == self.issued {
            self.latest_settled = true;
        }

        let params = ticket.params;
        match result.and_then(|body| normalize_response::<T>(&body, params.page, params.limit)) {
            Ok(page) => self.state.apply(page),
            Err(err) => {
                log::error!("failed to load page {} (limit {}): {err}", params.page, params.limit);
                self.state.fail(err);
            }
        }
        // Still waiting on the newest fetch.
        self.state.loading = !self.latest_settled;

        true
    }

    /// Runs the fetch for `ticket` against the source and completes it.
    pub async fn execute(&mut self, ticket: FetchTicket) -> bool {
        let result = self.source.fetch(&ticket.params).await;
        self.complete(ticket, result)
    }

    /// Initial load when the view mounts.
    pub async fn load(&mut self) {
        self.refresh().await;
    }

    /// Re-fetches with unchanged page, size and filters.
    pub async fn refresh(&mut self) {
        let ticket = self.request_refresh();
        self.execute(ticket).await;
    }

    pub async fn set_page(&mut self, page: usize) {
        if let Some(ticket) = self.request_page(page) {
            self.execute(ticket).await;
        }
    }

    pub async fn set_page_size(&mut self, page_size: usize) {
        if let Some(ticket) = self.request_page_size(page_size) {
            self.execute(ticket).await;
        }
    }

    pub async fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let ticket = self.request_filter(key, value);
        self.execute(ticket).await;
    }

    pub async fn set_filters(&mut self, filters: Filters) {
        let ticket = self.request_filters(filters);
        self.execute(ticket).await;
    }

    pub async fn clear_filters(&mut self) {
        let ticket = self.request_clear_filters();
        self.execute(ticket).await;
    }

    pub async fn next_page(&mut self) {
        if self.state.has_next() {
            let next = self.state.current_page + 1;
            self.set_page(next).await;
        }
    }

    pub async fn previous_page(&mut self) {
        if self.state.has_previous() {
            let previous = self.state.current_page - 1;
            self.set_page(previous).await;
        }
    }
}
