use futures::executor::block_on;
use insight_dashboard_wasm::application::{FetchOutcome, HistoryPager};
use insight_dashboard_wasm::domain::errors::{HistoryError, HistoryResult};
use insight_dashboard_wasm::domain::history::{
    HistoryPage, HistoryQuery, HistoryRecord, HistoryRepository, SortDirection,
};
use std::cell::RefCell;
use std::collections::VecDeque;

fn record(id: i64) -> HistoryRecord {
    HistoryRecord {
        id,
        timestamp: "2024-03-01T10:00:00".to_string(),
        prompt_type: "stock-analysis".to_string(),
        provider: "openai".to_string(),
        model: "gpt-4".to_string(),
        tokens_used: Some(100),
        response_time_ms: Some(1200),
        input_parameters: None,
        prompt: String::new(),
        response: String::new(),
    }
}

fn page(current: u32, size: u32, total_items: u64) -> HistoryPage {
    let total_pages = total_items.div_ceil(u64::from(size)) as u32;
    let start = u64::from(current) * u64::from(size);
    let end = (start + u64::from(size)).min(total_items);
    HistoryPage {
        content: (start..end).map(|id| record(id as i64)).collect(),
        total_items,
        total_pages,
        current_page: current,
        page_size: size,
    }
}

/// Serves a fixed 137-item history and records every query
#[derive(Default)]
struct FakeHistory {
    queries: RefCell<Vec<HistoryQuery>>,
    failures: RefCell<VecDeque<String>>,
}

impl FakeHistory {
    fn fail_next(&self, message: &str) {
        self.failures.borrow_mut().push_back(message.to_string());
    }
}

impl HistoryRepository for FakeHistory {
    async fn fetch_page(&self, query: &HistoryQuery) -> HistoryResult<HistoryPage> {
        self.queries.borrow_mut().push(query.clone());
        if let Some(message) = self.failures.borrow_mut().pop_front() {
            return Err(HistoryError::FetchFailed(message));
        }
        Ok(page(query.page, query.size, 137))
    }

    async fn fetch_record(&self, id: i64) -> HistoryResult<HistoryRecord> {
        Ok(record(id))
    }

    async fn delete_record(&self, _id: i64) -> HistoryResult<()> {
        Ok(())
    }
}

fn loaded_len(outcome: FetchOutcome) -> usize {
    match outcome {
        FetchOutcome::Loaded(records) => records.len(),
        other => panic!("expected a loaded page, got {:?}", other),
    }
}

#[test]
fn first_load_commits_server_totals() {
    let repo = FakeHistory::default();
    let mut pager = HistoryPager::new(25);

    let request = pager.go_to_page(0).unwrap();
    assert!(pager.is_pending());
    assert_eq!(loaded_len(block_on(pager.run(&repo, request))), 25);

    let state = pager.state();
    assert_eq!(state.current_page, 0);
    assert_eq!(state.total_items, 137);
    assert_eq!(state.total_pages, 6);
    assert_eq!(state.sort_direction, SortDirection::Desc);
    assert!(!pager.is_pending());
}

#[test]
fn next_and_previous_follow_committed_page() {
    let repo = FakeHistory::default();
    let mut pager = HistoryPager::new(25);
    let request = pager.go_to_page(0).unwrap();
    block_on(pager.run(&repo, request));
    let request = pager.next_page().unwrap();
    assert_eq!(request.query.page, 1);
    block_on(pager.run(&repo, request));
    assert_eq!(pager.state().current_page, 1);

    let request = pager.previous_page().unwrap();
    assert_eq!(request.query.page, 0);
    block_on(pager.run(&repo, request));
    assert_eq!(pager.state().current_page, 0);
}

#[test]
fn previous_on_first_page_is_negative() {
    let mut pager = HistoryPager::new(25);
    assert_eq!(pager.previous_page(), Err(HistoryError::NegativePage(-1)));
    assert_eq!(pager.go_to_page(-3), Err(HistoryError::NegativePage(-3)));
    assert!(!pager.is_pending());
}

#[test]
fn failure_leaves_state_unchanged() {
    let repo = FakeHistory::default();
    let mut pager = HistoryPager::new(25);
    let request = pager.go_to_page(2).unwrap();
    block_on(pager.run(&repo, request));
    let before = pager.state().clone();

    repo.fail_next("connection refused");
    let request = pager.toggle_sort();
    let outcome = block_on(pager.run(&repo, request));

    assert_eq!(outcome, FetchOutcome::Failed(HistoryError::FetchFailed("connection refused".to_string())));
    assert_eq!(pager.state(), &before);

    // The failed sort toggle must not leak into the next request
    let retry = pager.reload();
    assert_eq!(retry.query.page, 2);
    assert_eq!(retry.query.sort, SortDirection::Desc);
}

#[test]
fn stale_response_is_discarded() {
    let mut pager = HistoryPager::new(25);
    let slow = pager.go_to_page(1).unwrap();
    let fast = pager.go_to_page(4).unwrap();

    assert_eq!(loaded_len(pager.complete(&fast, Ok(page(4, 25, 137)))), 25);
    assert_eq!(pager.complete(&slow, Ok(page(1, 25, 137))), FetchOutcome::Discarded);
    assert_eq!(pager.state().current_page, 4);
}

#[test]
fn page_size_change_returns_to_first_page() {
    let repo = FakeHistory::default();
    let mut pager = HistoryPager::new(25);
    let request = pager.go_to_page(3).unwrap();
    block_on(pager.run(&repo, request));

    let request = pager.set_page_size(50).unwrap();
    assert_eq!((request.query.page, request.query.size), (0, 50));
    block_on(pager.run(&repo, request));

    assert_eq!(pager.state().page_size, 50);
    assert_eq!(pager.state().current_page, 0);
    assert_eq!(pager.state().total_pages, 3);
}

#[test]
fn zero_page_size_is_rejected() {
    let mut pager = HistoryPager::new(25);
    assert_eq!(pager.set_page_size(0), Err(HistoryError::InvalidPageSize));
    assert_eq!(pager.state().page_size, 25);
}

#[test]
fn sort_toggle_returns_to_first_page() {
    let repo = FakeHistory::default();
    let mut pager = HistoryPager::new(25);
    let request = pager.go_to_page(2).unwrap();
    block_on(pager.run(&repo, request));

    let request = pager.toggle_sort();
    assert_eq!(request.query.sort, SortDirection::Asc);
    assert_eq!(request.query.page, 0);
    block_on(pager.run(&repo, request));
    assert_eq!(pager.state().sort_direction, SortDirection::Asc);

    let request = pager.toggle_sort();
    assert_eq!(request.query.sort, SortDirection::Desc);
}

#[test]
fn filter_is_trimmed_and_resets_page() {
    let repo = FakeHistory::default();
    let mut pager = HistoryPager::new(25);
    let request = pager.go_to_page(1).unwrap();
    block_on(pager.run(&repo, request));

    let request = pager.set_prompt_filter(Some(" portfolio-review "));
    assert_eq!(request.query.prompt_type.as_deref(), Some("portfolio-review"));
    assert_eq!(request.query.page, 0);
    block_on(pager.run(&repo, request));
    assert_eq!(pager.prompt_filter(), Some("portfolio-review"));

    let request = pager.set_prompt_filter(Some("   "));
    assert_eq!(request.query.prompt_type, None);
    block_on(pager.run(&repo, request));
    assert_eq!(pager.prompt_filter(), None);
}

#[test]
fn reload_requests_committed_page() {
    let repo = FakeHistory::default();
    let mut pager = HistoryPager::new(10);
    let request = pager.go_to_page(5).unwrap();
    block_on(pager.run(&repo, request));

    let request = pager.reload();
    assert_eq!(
        request.query,
        HistoryQuery { page: 5, size: 10, sort: SortDirection::Desc, prompt_type: None }
    );
    assert_eq!(repo.queries.borrow().len(), 1);
}

#[test]
fn out_of_range_server_page_is_clamped() {
    let mut pager = HistoryPager::new(25);
    let request = pager.go_to_page(9).unwrap();
    let reply = HistoryPage { content: Vec::new(), total_items: 30, total_pages: 2, current_page: 9, page_size: 25 };

    pager.complete(&request, Ok(reply));
    assert_eq!(pager.state().current_page, 1);
    assert!(pager.state().is_last_page());
}

#[test]
fn window_reflects_committed_state() {
    let repo = FakeHistory::default();
    let mut pager = HistoryPager::new(5);
    let request = pager.go_to_page(14).unwrap();
    block_on(pager.run(&repo, request));

    assert_eq!(pager.state().total_pages, 28);
    assert_eq!(pager.page_window().to_string(), "1 2 3 ... 13 14 15 16 17 ... 26 27 28");
}
