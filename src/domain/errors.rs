use thiserror::Error;

/// Failures of the indicator pipeline (fetch → extract → interpret)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    /// Nothing loaded yet; presented as "no data", not as a failure
    #[error("No data available")]
    EmptyData,

    #[error("Invalid indicator data format: {0}")]
    MalformedPayload(String),

    #[error("Missing field '{0}' on latest data point")]
    MissingField(String),

    #[error("Error loading indicator: {0}")]
    FetchFailed(String),

    #[error("No stock selected")]
    NoSymbol,
}

impl IndicatorError {
    pub fn is_empty_state(&self) -> bool {
        matches!(self, IndicatorError::EmptyData)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    #[error("Error loading history: {0}")]
    FetchFailed(String),

    #[error("Page size must be positive")]
    InvalidPageSize,

    #[error("Page index must not be negative: {0}")]
    NegativePage(i64),
}

impl HistoryError {
    /// Message without the "Error loading history" prefix
    pub fn detail(&self) -> String {
        match self {
            HistoryError::FetchFailed(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Canvas '{0}' not found")]
    CanvasNotFound(String),

    #[error("2D context unavailable: {0}")]
    Context(String),
}

pub type IndicatorResult<T> = Result<T, IndicatorError>;
pub type HistoryResult<T> = Result<T, HistoryError>;
pub type RenderResult<T> = Result<T, RenderError>;
