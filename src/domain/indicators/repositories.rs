use super::extractor::IndicatorResponse;
use super::value_objects::{IndicatorKind, Symbol};
use crate::domain::errors::IndicatorResult;

/// Parameters of a single indicator fetch
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRequest {
    pub symbol: Symbol,
    pub kind: IndicatorKind,
    /// Ignored for kinds that take no period
    pub period: Option<u32>,
    pub interval: String,
    pub series_type: String,
}

impl IndicatorRequest {
    pub fn effective_period(&self) -> Option<u32> {
        if self.kind.uses_period() { self.period } else { None }
    }
}

/// Source of indicator payloads (the market-data API in production)
#[allow(async_fn_in_trait)]
pub trait IndicatorRepository {
    async fn fetch_indicator(&self, request: &IndicatorRequest) -> IndicatorResult<IndicatorResponse>;
}
