use serde::Serialize;
use std::fmt;
use strum::{AsRefStr, EnumString};

pub const DEFAULT_PAGE_SIZE: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[strum(serialize = "asc")]
    Asc,
    #[default]
    #[strum(serialize = "desc")]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Caption of the sort button
    pub fn label(&self) -> &'static str {
        match self {
            Self::Desc => "Newest First",
            Self::Asc => "Oldest First",
        }
    }
}

/// Committed pagination state, changed only by a successful page fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub current_page: u32,
    pub page_size: u32,
    pub sort_direction: SortDirection,
    pub total_items: u64,
    pub total_pages: u32,
}

impl PageState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 0,
            page_size: page_size.max(1),
            sort_direction: SortDirection::Desc,
            total_items: 0,
            total_pages: 0,
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page + 1 >= self.total_pages
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Parameters sent to the history collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub page: u32,
    pub size: u32,
    pub sort: SortDirection,
    pub prompt_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "index", rename_all = "lowercase")]
pub enum PageWindowItem {
    Page(u32),
    Ellipsis,
}

/// Ordered page buttons and gap markers of the pagination control
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct PageWindow(pub Vec<PageWindowItem>);

impl PageWindow {
    pub fn items(&self) -> &[PageWindowItem] {
        &self.0
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().filter_map(|item| match item {
            PageWindowItem::Page(p) => Some(*p),
            PageWindowItem::Ellipsis => None,
        })
    }

    pub fn ellipsis_count(&self) -> usize {
        self.0.iter().filter(|item| matches!(item, PageWindowItem::Ellipsis)).count()
    }
}

/// Renders 1-based page labels, e.g. `1 2 3 ... 9 10 11`
impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|item| match item {
                PageWindowItem::Page(p) => (p + 1).to_string(),
                PageWindowItem::Ellipsis => "...".to_string(),
            })
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
