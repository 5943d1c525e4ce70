use insight_dashboard_wasm::domain::errors::HistoryError;
use insight_dashboard_wasm::domain::history::{HistoryRecord, PageState, SortDirection};
use insight_dashboard_wasm::presentation::history_presenter::{EMPTY_HISTORY_TEXT, format_timestamp};
use insight_dashboard_wasm::presentation::HistoryPresenter;
use serde_json::json;

fn state(current_page: u32, page_size: u32, total_items: u64) -> PageState {
    PageState {
        current_page,
        page_size,
        sort_direction: SortDirection::Desc,
        total_items,
        total_pages: total_items.div_ceil(u64::from(page_size)) as u32,
    }
}

fn record() -> HistoryRecord {
    HistoryRecord {
        id: 42,
        timestamp: "2024-03-01T14:05:09.123".to_string(),
        prompt_type: "portfolio-review".to_string(),
        provider: "anthropic".to_string(),
        model: "claude".to_string(),
        tokens_used: Some(512),
        response_time_ms: Some(830),
        input_parameters: Some(json!({ "symbol": "AAPL" })),
        prompt: "Review my portfolio".to_string(),
        response: "Looks balanced".to_string(),
    }
}

#[test]
fn summary_counts_rows_on_page() {
    assert_eq!(HistoryPresenter::summary(&state(0, 25, 137), 25), "1-25");
    assert_eq!(HistoryPresenter::summary(&state(5, 25, 137), 12), "126-137");
    assert_eq!(HistoryPresenter::summary(&state(0, 25, 0), 0), "0-0");
}

#[test]
fn row_formats_metrics() {
    let row = HistoryPresenter::row(&record());
    assert_eq!(row.timestamp, "2024-03-01 14:05:09");
    assert_eq!(row.type_label, "Portfolio Review");
    assert_eq!(row.tokens, "512");
    assert_eq!(row.latency, "830 ms");
}

#[test]
fn absent_metrics_are_not_available() {
    let mut r = record();
    r.tokens_used = None;
    r.response_time_ms = None;
    r.prompt_type = "custom-prompt".to_string();

    let row = HistoryPresenter::row(&r);
    assert_eq!(row.tokens, "N/A");
    assert_eq!(row.latency, "N/A");
    assert_eq!(row.type_label, "custom-prompt");

    r.tokens_used = Some(0);
    assert_eq!(HistoryPresenter::row(&r).tokens, "0");
}

#[test]
fn details_pretty_print_parameters() {
    let details = HistoryPresenter::details(&record());
    assert_eq!(details.response_time, "830");
    assert_eq!(details.input_parameters, "{\n  \"symbol\": \"AAPL\"\n}");
    assert_eq!(details.prompt, "Review my portfolio");

    let mut r = record();
    r.input_parameters = None;
    assert_eq!(HistoryPresenter::details(&r).input_parameters, "null");
}

#[test]
fn pagination_flags_on_first_and_last_page() {
    let first = HistoryPresenter::pagination(&state(0, 25, 137));
    assert!(first.visible);
    assert!(first.previous.disabled);
    assert!(!first.next.disabled);
    assert!(first.pages[0].active);

    let last = HistoryPresenter::pagination(&state(5, 25, 137));
    assert!(!last.previous.disabled);
    assert!(last.next.disabled);
    assert_eq!(last.previous.page, Some(4));
}

#[test]
fn pagination_hidden_for_single_page() {
    assert!(!HistoryPresenter::pagination(&state(0, 25, 10)).visible);
    assert!(!HistoryPresenter::pagination(&state(0, 25, 0)).visible);
}

#[test]
fn ellipsis_buttons_are_disabled() {
    let view = HistoryPresenter::pagination(&state(10, 5, 100));
    let labels: Vec<&str> = view.pages.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "2", "3", "...", "9", "10", "11", "12", "13", "...", "18", "19", "20"]);
    assert!(view.pages.iter().filter(|b| b.page.is_none()).all(|b| b.disabled));
}

#[test]
fn empty_page_shows_message() {
    let view = HistoryPresenter::present(&[], &state(0, 25, 0));
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_message, Some(EMPTY_HISTORY_TEXT));
    assert_eq!(view.summary, "0-0");
}

#[test]
fn present_uses_one_based_page_and_sort_label() {
    let view = HistoryPresenter::present(&[record()], &state(2, 1, 7));
    assert_eq!(view.current_page, 3);
    assert_eq!(view.total_pages, 7);
    assert_eq!(view.sort_label, "Sort: Newest First");
    assert_eq!(view.summary, "3-3");
    assert_eq!(view.empty_message, None);
}

#[test]
fn error_row_shows_bare_message() {
    let error = HistoryError::FetchFailed("Internal Server Error".to_string());
    assert_eq!(HistoryPresenter::error_row(&error), "Error: Internal Server Error");
}

#[test]
fn timestamps() {
    assert_eq!(format_timestamp("2024-03-01T14:05:09Z"), "2024-03-01 14:05:09");
    assert_eq!(format_timestamp("2024-03-01T14:05:09"), "2024-03-01 14:05:09");
    assert_eq!(format_timestamp("yesterday"), "yesterday");
}
