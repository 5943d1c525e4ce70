use crate::config::DashboardConfig;
use crate::domain::{
    chart::{ChartProjection, ChartProjector},
    errors::{IndicatorError, IndicatorResult},
    indicators::{
        ExtractedSeries, IndicatorInterpreter, IndicatorKind, IndicatorRepository, IndicatorRequest,
        IndicatorResponse, IndicatorSeriesExtractor, Interpretation, Symbol,
    },
    logging::LogComponent,
};

/// Everything the indicator panel shows for one selection
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorAnalysis {
    pub symbol: Symbol,
    pub kind: IndicatorKind,
    /// e.g. `RSI (14)`
    pub title: String,
    /// e.g. `AAPL - RSI (14)`
    pub chart_title: String,
    pub series: ExtractedSeries,
    pub projection: ChartProjection,
    /// Fails on its own when the latest point lacks a field; the chart stays
    pub interpretation: IndicatorResult<Interpretation>,
}

/// Extract, project and interpret one indicator response.
///
/// Projection and interpretation both read the same capped series, so the
/// chart and the text always describe the same dates. Only extraction
/// failures reject the whole response.
pub fn analyze(
    response: &IndicatorResponse,
    symbol: &Symbol,
    kind: IndicatorKind,
    period: Option<u32>,
    max_points: usize,
) -> IndicatorResult<IndicatorAnalysis> {
    let series = IndicatorSeriesExtractor::new(max_points).extract(response.payload(), kind)?;
    let interpretation = series
        .latest()
        .ok_or(IndicatorError::EmptyData)
        .and_then(|latest| IndicatorInterpreter::interpret(kind, latest, period));

    let title = kind.display_name(period);
    let projection = ChartProjector::project(&series.points, kind, &title);

    Ok(IndicatorAnalysis {
        symbol: symbol.clone(),
        kind,
        chart_title: format!("{} - {}", symbol, title),
        title,
        series,
        projection,
        interpretation,
    })
}

/// Indicator use case: builds requests from the configured defaults and runs
/// them through the repository
pub struct IndicatorService<R: IndicatorRepository> {
    repository: R,
    config: DashboardConfig,
}

impl<R: IndicatorRepository> IndicatorService<R> {
    pub fn new(repository: R, config: DashboardConfig) -> Self {
        Self { repository, config }
    }

    /// `period` overrides the configured default; it is dropped for MACD
    pub fn request_for(
        &self,
        symbol: Option<&str>,
        kind: IndicatorKind,
        period: Option<u32>,
    ) -> IndicatorResult<IndicatorRequest> {
        let symbol = symbol.and_then(Symbol::new).ok_or(IndicatorError::NoSymbol)?;
        let period = if kind.uses_period() {
            period.filter(|p| *p > 0).or_else(|| self.config.period_for(kind))
        } else {
            None
        };

        Ok(IndicatorRequest {
            symbol,
            kind,
            period,
            interval: self.config.interval.clone(),
            series_type: self.config.series_type.clone(),
        })
    }

    pub async fn load(&self, request: &IndicatorRequest) -> IndicatorResult<IndicatorAnalysis> {
        crate::log_info!(
            LogComponent::Application("IndicatorService"),
            "Loading {} for {}",
            request.kind.display_name(request.effective_period()),
            request.symbol
        );

        let response = self.repository.fetch_indicator(request).await?;
        let analysis = analyze(
            &response,
            &request.symbol,
            request.kind,
            request.effective_period(),
            self.config.max_points,
        );

        match &analysis {
            Ok(IndicatorAnalysis { interpretation: Ok(latest), chart_title, series, .. }) => {
                crate::log_info!(
                    LogComponent::Application("IndicatorService"),
                    "{}: {} points, latest {}",
                    chart_title,
                    series.len(),
                    latest.date
                );
            }
            Ok(IndicatorAnalysis { interpretation: Err(err), chart_title, .. }) => {
                crate::log_warn!(
                    LogComponent::Application("IndicatorService"),
                    "{}: chart drawn, latest point not interpreted: {}",
                    chart_title,
                    err
                );
            }
            Err(err) => {
                crate::log_warn!(
                    LogComponent::Application("IndicatorService"),
                    "{} for {}: {}",
                    request.kind.analysis_label(),
                    request.symbol,
                    err
                );
            }
        }
        analysis
    }
}
