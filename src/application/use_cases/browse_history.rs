use crate::domain::{
    errors::{HistoryError, HistoryResult},
    history::{
        HistoryPage, HistoryQuery, HistoryRecord, HistoryRepository, PageState, PageWindow, compute_page_window,
    },
    logging::LogComponent,
};

/// A page fetch issued by [`HistoryPager`]; the ticket identifies its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub ticket: u64,
    pub query: HistoryQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(Vec<HistoryRecord>),
    /// A newer request was issued after this one
    Discarded,
    Failed(HistoryError),
}

/// Owner of the history pagination state.
///
/// Every action returns a [`PendingRequest`] to be fetched by the caller and
/// handed back through [`HistoryPager::complete`]. Only the response to the most
/// recently issued request is applied, so out-of-order replies never overwrite a
/// newer page. A failed fetch leaves [`PageState`] untouched.
#[derive(Debug, Clone)]
pub struct HistoryPager {
    state: PageState,
    prompt_filter: Option<String>,
    intent: HistoryQuery,
    next_ticket: u64,
    latest_ticket: Option<u64>,
}

impl HistoryPager {
    pub fn new(page_size: u32) -> Self {
        let state = PageState::new(page_size);
        let intent = HistoryQuery {
            page: 0,
            size: state.page_size,
            sort: state.sort_direction,
            prompt_type: None,
        };
        Self { state, prompt_filter: None, intent, next_ticket: 0, latest_ticket: None }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn prompt_filter(&self) -> Option<&str> {
        self.prompt_filter.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.latest_ticket.is_some()
    }

    /// Buttons for the committed state
    pub fn page_window(&self) -> PageWindow {
        compute_page_window(self.state.total_pages, self.state.current_page)
    }

    /// No upper clamp: the server owns `totalPages`
    pub fn go_to_page(&mut self, page: i64) -> HistoryResult<PendingRequest> {
        let page = u32::try_from(page).map_err(|_| HistoryError::NegativePage(page))?;
        self.intent.page = page;
        Ok(self.issue())
    }

    pub fn next_page(&mut self) -> HistoryResult<PendingRequest> {
        self.go_to_page(i64::from(self.state.current_page) + 1)
    }

    pub fn previous_page(&mut self) -> HistoryResult<PendingRequest> {
        self.go_to_page(i64::from(self.state.current_page) - 1)
    }

    pub fn set_page_size(&mut self, size: u32) -> HistoryResult<PendingRequest> {
        if size == 0 {
            return Err(HistoryError::InvalidPageSize);
        }
        self.intent.size = size;
        self.intent.page = 0;
        Ok(self.issue())
    }

    pub fn toggle_sort(&mut self) -> PendingRequest {
        self.intent.sort = self.intent.sort.toggled();
        self.intent.page = 0;
        self.issue()
    }

    /// Empty or blank filters mean "all prompt types"
    pub fn set_prompt_filter(&mut self, prompt_type: Option<&str>) -> PendingRequest {
        self.intent.prompt_type = prompt_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self.intent.page = 0;
        self.issue()
    }

    /// Re-fetch the committed page, e.g. after a delete
    pub fn reload(&mut self) -> PendingRequest {
        self.intent = self.committed_query();
        self.issue()
    }

    pub fn complete(&mut self, request: &PendingRequest, result: HistoryResult<HistoryPage>) -> FetchOutcome {
        if self.latest_ticket != Some(request.ticket) {
            crate::log_debug!(
                LogComponent::Application("HistoryPager"),
                "discarding stale response #{} (page {})",
                request.ticket,
                request.query.page
            );
            return FetchOutcome::Discarded;
        }
        self.latest_ticket = None;

        match result {
            Ok(page) => {
                self.commit(&request.query, &page);
                FetchOutcome::Loaded(page.content)
            }
            Err(err) => {
                crate::log_warn!(
                    LogComponent::Application("HistoryPager"),
                    "page {} failed: {}",
                    request.query.page,
                    err
                );
                self.intent = self.committed_query();
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Fetch and complete in one step
    pub async fn run<R: HistoryRepository>(&mut self, repository: &R, request: PendingRequest) -> FetchOutcome {
        let result = repository.fetch_page(&request.query).await;
        self.complete(&request, result)
    }

    fn issue(&mut self) -> PendingRequest {
        self.next_ticket += 1;
        self.latest_ticket = Some(self.next_ticket);
        PendingRequest { ticket: self.next_ticket, query: self.intent.clone() }
    }

    fn committed_query(&self) -> HistoryQuery {
        HistoryQuery {
            page: self.state.current_page,
            size: self.state.page_size,
            sort: self.state.sort_direction,
            prompt_type: self.prompt_filter.clone(),
        }
    }

    fn commit(&mut self, query: &HistoryQuery, page: &HistoryPage) {
        let last_page = page.total_pages.max(1) - 1;
        if page.current_page > last_page {
            crate::log_warn!(
                LogComponent::Application("HistoryPager"),
                "server reported page {} of {}, showing page {}",
                page.current_page,
                page.total_pages,
                last_page
            );
        }

        self.state = PageState {
            current_page: page.current_page.min(last_page),
            page_size: if page.page_size > 0 { page.page_size } else { query.size },
            sort_direction: query.sort,
            total_items: page.total_items,
            total_pages: page.total_pages,
        };
        self.prompt_filter = query.prompt_type.clone();
        self.intent = self.committed_query();

        crate::log_debug!(
            LogComponent::Application("HistoryPager"),
            "page {}/{} ({} items, {})",
            self.state.current_page + 1,
            self.state.total_pages,
            self.state.total_items,
            self.state.sort_direction.as_ref()
        );
    }
}

impl Default for HistoryPager {
    fn default() -> Self {
        Self::new(crate::domain::history::DEFAULT_PAGE_SIZE)
    }
}

