use crate::domain::{
    errors::HistoryError,
    history::{HistoryRecord, PageState, PageWindowItem, PromptType, compute_page_window},
};
use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

pub const EMPTY_HISTORY_TEXT: &str = "No history records found";
const NOT_AVAILABLE: &str = "N/A";

/// One table row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub id: i64,
    pub timestamp: String,
    pub type_label: String,
    pub provider: String,
    pub model: String,
    pub tokens: String,
    pub latency: String,
}

/// A pagination link; `page` is `None` for the ellipsis marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageButton {
    pub label: String,
    pub page: Option<u32>,
    pub active: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    /// False when there is at most one page
    pub visible: bool,
    pub previous: PageButton,
    pub pages: Vec<PageButton>,
    pub next: PageButton,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub rows: Vec<HistoryRow>,
    /// Shown instead of rows when the page is empty
    pub empty_message: Option<&'static str>,
    /// `"<start>-<end>"` or `"0-0"`
    pub summary: String,
    pub total_items: u64,
    /// 1-based current page
    pub current_page: u32,
    pub total_pages: u32,
    pub sort_label: String,
    pub pagination: PaginationView,
}

/// Full record shown in the details dialog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDetails {
    pub id: i64,
    pub timestamp: String,
    pub type_label: String,
    pub provider: String,
    pub model: String,
    pub tokens: String,
    pub response_time: String,
    /// Pretty-printed JSON
    pub input_parameters: String,
    pub prompt: String,
    pub response: String,
}

pub struct HistoryPresenter;

impl HistoryPresenter {
    pub fn present(records: &[HistoryRecord], state: &PageState) -> HistoryView {
        HistoryView {
            rows: records.iter().map(Self::row).collect(),
            empty_message: records.is_empty().then_some(EMPTY_HISTORY_TEXT),
            summary: Self::summary(state, records.len()),
            total_items: state.total_items,
            current_page: state.current_page + 1,
            total_pages: state.total_pages,
            sort_label: format!("Sort: {}", state.sort_direction.label()),
            pagination: Self::pagination(state),
        }
    }

    pub fn summary(state: &PageState, record_count: usize) -> String {
        if state.total_items == 0 {
            return "0-0".to_string();
        }
        let start = u64::from(state.current_page) * u64::from(state.page_size) + 1;
        let end = (start + record_count as u64).saturating_sub(1).min(state.total_items);
        format!("{}-{}", start, end)
    }

    pub fn pagination(state: &PageState) -> PaginationView {
        let current = state.current_page;
        let pages = compute_page_window(state.total_pages, current)
            .items()
            .iter()
            .map(|item| match item {
                PageWindowItem::Page(p) => PageButton {
                    label: (p + 1).to_string(),
                    page: Some(*p),
                    active: *p == current,
                    disabled: false,
                },
                PageWindowItem::Ellipsis => PageButton {
                    label: "...".to_string(),
                    page: None,
                    active: false,
                    disabled: true,
                },
            })
            .collect();

        PaginationView {
            visible: state.total_pages > 1,
            previous: PageButton {
                label: "Previous".to_string(),
                page: current.checked_sub(1),
                active: false,
                disabled: state.is_first_page(),
            },
            pages,
            next: PageButton {
                label: "Next".to_string(),
                page: Some(current + 1),
                active: false,
                disabled: state.is_last_page(),
            },
        }
    }

    pub fn row(record: &HistoryRecord) -> HistoryRow {
        HistoryRow {
            id: record.id,
            timestamp: format_timestamp(&record.timestamp),
            type_label: PromptType::label_for(&record.prompt_type),
            provider: record.provider.clone(),
            model: record.model.clone(),
            tokens: or_not_available(record.tokens_used),
            latency: record
                .response_time_ms
                .map(|ms| format!("{} ms", ms))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }

    pub fn details(record: &HistoryRecord) -> RecordDetails {
        RecordDetails {
            id: record.id,
            timestamp: format_timestamp(&record.timestamp),
            type_label: PromptType::label_for(&record.prompt_type),
            provider: record.provider.clone(),
            model: record.model.clone(),
            tokens: or_not_available(record.tokens_used),
            response_time: or_not_available(record.response_time_ms),
            input_parameters: record
                .input_parameters
                .as_ref()
                .and_then(|v| serde_json::to_string_pretty(v).ok())
                .unwrap_or_else(|| "null".to_string()),
            prompt: record.prompt.clone(),
            response: record.response.clone(),
        }
    }

    /// Text of the single error row that replaces the table body
    pub fn error_row(error: &HistoryError) -> String {
        format!("Error: {}", error.detail())
    }
}

fn or_not_available<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `2024-03-01 14:05:09`; unparseable input is shown as received
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}
