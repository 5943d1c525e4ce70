use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, EnumIter, EnumString};

/// Saved LLM prompt/response, owned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: i64,
    pub timestamp: String,
    pub prompt_type: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub tokens_used: Option<u32>,
    #[serde(default)]
    pub response_time_ms: Option<u64>,
    #[serde(default)]
    pub input_parameters: Option<Value>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub response: String,
}

/// Prompt types with a human label; anything else is shown verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, AsRefStr)]
pub enum PromptType {
    #[strum(serialize = "stock-analysis")]
    StockAnalysis,
    #[strum(serialize = "portfolio-review")]
    PortfolioReview,
    #[strum(serialize = "investment-advice")]
    InvestmentAdvice,
}

impl PromptType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::StockAnalysis => "Stock Analysis",
            Self::PortfolioReview => "Portfolio Review",
            Self::InvestmentAdvice => "Investment Advice",
        }
    }

    pub fn label_for(raw: &str) -> String {
        raw.parse::<PromptType>()
            .map(|t| t.label().to_string())
            .unwrap_or_else(|_| raw.to_string())
    }
}

/// One page of history as returned by the paginated endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    #[serde(default)]
    pub content: Vec<HistoryRecord>,
    pub total_items: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub page_size: u32,
}
