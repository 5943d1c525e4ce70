use gloo::utils::format::JsValueSerdeExt;
use js_sys::Promise;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::{
    application::{IndicatorAnalysis, IndicatorService, analyze},
    config::config,
    domain::{
        chart::{ChartProjection, ChartProjector},
        errors::IndicatorError,
        history::{HistoryPage, PageState, SortDirection, compute_page_window},
        indicators::{
            IndicatorInterpreter, IndicatorKind, IndicatorPayload, IndicatorResponse, IndicatorSeriesExtractor,
            Interpretation,
        },
        logging::{LogComponent, get_logger},
    },
    infrastructure::DashboardHttpClient,
    presentation::{HistoryPresenter, IndicatorPresenter, IndicatorView},
};

/// Interpretation plus its display model, as handed to JavaScript
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InterpretationResult {
    interpretation: Interpretation,
    view: IndicatorView,
}

/// Indicator analysis as handed to JavaScript; `interpretation` is null when
/// the latest point could not be interpreted and `view` then carries the error
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisResult<'a> {
    symbol: &'a str,
    kind: IndicatorKind,
    title: &'a str,
    chart_title: &'a str,
    projection: &'a ChartProjection,
    interpretation: Option<&'a Interpretation>,
    view: IndicatorView,
}

impl<'a> From<&'a IndicatorAnalysis> for AnalysisResult<'a> {
    fn from(analysis: &'a IndicatorAnalysis) -> Self {
        Self {
            symbol: analysis.symbol.value(),
            kind: analysis.kind,
            title: &analysis.title,
            chart_title: &analysis.chart_title,
            projection: &analysis.projection,
            interpretation: analysis.interpretation.as_ref().ok(),
            view: IndicatorPresenter::present_result(&analysis.interpretation),
        }
    }
}

/// Accepts either the full endpoint body or the bare `technicalAnalysis` object
pub fn response_from_json(value: Value) -> Result<IndicatorResponse, IndicatorError> {
    match value {
        Value::Null => Ok(IndicatorResponse::default()),
        Value::Object(map) if map.contains_key("technicalAnalysis") => {
            serde_json::from_value(Value::Object(map)).map_err(|e| IndicatorError::MalformedPayload(e.to_string()))
        }
        Value::Object(map) => Ok(IndicatorResponse { technical_analysis: Some(IndicatorPayload(map)) }),
        other => Err(IndicatorError::MalformedPayload(format!("expected an object, got {}", other))),
    }
}

fn parse_kind(kind: &str) -> Result<IndicatorKind, JsValue> {
    kind.parse::<IndicatorKind>()
        .map_err(|_| JsValue::from_str(&format!("Unknown indicator type: {}", kind)))
}

/// Caller's period, else the configured default; MACD has none
fn resolve_period(kind: IndicatorKind, period: Option<u32>) -> Option<u32> {
    if kind.uses_period() {
        period.filter(|p| *p > 0).or_else(|| config().period_for(kind))
    } else {
        None
    }
}

fn decode_payload(payload: &JsValue) -> Result<IndicatorResponse, JsValue> {
    let value: Value = if payload.is_undefined() || payload.is_null() {
        Value::Null
    } else {
        payload.into_serde().map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    response_from_json(value).map_err(to_js_error)
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    JsValue::from_serde(value).map_err(to_js_error)
}

/// Interpret the newest point of an indicator payload
#[wasm_bindgen(js_name = interpretIndicator)]
pub fn interpret_indicator(payload: JsValue, kind: String, period: Option<u32>) -> Result<JsValue, JsValue> {
    let kind = parse_kind(&kind)?;
    let response = decode_payload(&payload)?;
    let period = resolve_period(kind, period);

    let series = IndicatorSeriesExtractor::new(config().max_points)
        .extract(response.payload(), kind)
        .map_err(to_js_error)?;
    let latest = series.latest().ok_or_else(|| to_js_error(IndicatorError::EmptyData))?;
    let interpretation = IndicatorInterpreter::interpret(kind, latest, period).map_err(to_js_error)?;
    let view = IndicatorPresenter::present(&interpretation);

    to_js(&InterpretationResult { interpretation, view })
}

/// Chart-ready series for an indicator payload; `period` only names the series
#[wasm_bindgen(js_name = projectIndicator)]
pub fn project_indicator(
    payload: JsValue,
    kind: String,
    max_points: Option<usize>,
    period: Option<u32>,
) -> Result<JsValue, JsValue> {
    let kind = parse_kind(&kind)?;
    let response = decode_payload(&payload)?;
    let projection = project_response(&response, kind, max_points, period).map_err(to_js_error)?;
    to_js(&projection)
}

/// Projection behind [`project_indicator`], usable without a JS payload
pub fn project_response(
    response: &IndicatorResponse,
    kind: IndicatorKind,
    max_points: Option<usize>,
    period: Option<u32>,
) -> Result<ChartProjection, IndicatorError> {
    let series = IndicatorSeriesExtractor::new(max_points.unwrap_or(config().max_points))
        .extract(response.payload(), kind)?;
    let name = kind.display_name(resolve_period(kind, period));
    Ok(ChartProjector::project(&series.points, kind, &name))
}

/// Page buttons and ellipsis markers for a pagination control
#[wasm_bindgen(js_name = pageWindow)]
pub fn page_window(total_pages: u32, current_page: u32) -> Result<JsValue, JsValue> {
    to_js(&compute_page_window(total_pages, current_page))
}

/// Table rows, summary and pagination for one fetched history page
#[wasm_bindgen(js_name = presentHistory)]
pub fn present_history(page: JsValue, sort: Option<String>) -> Result<JsValue, JsValue> {
    let page: HistoryPage = page.into_serde().map_err(to_js_error)?;
    let sort_direction = sort
        .as_deref()
        .and_then(|s| s.parse::<SortDirection>().ok())
        .unwrap_or_default();
    let state = PageState {
        current_page: page.current_page,
        page_size: page.page_size.max(1),
        sort_direction,
        total_items: page.total_items,
        total_pages: page.total_pages,
    };

    to_js(&HistoryPresenter::present(&page.content, &state))
}

/// Fetch, project and interpret an indicator from the configured API
#[wasm_bindgen(js_name = loadIndicator)]
pub fn load_indicator(symbol: String, kind: String, period: Option<u32>) -> Promise {
    future_to_promise(async move {
        let kind = parse_kind(&kind)?;
        let service = IndicatorService::new(DashboardHttpClient::new(&config().api_base_url), config().clone());
        let request = service.request_for(Some(&symbol), kind, period).map_err(to_js_error)?;

        match service.load(&request).await {
            Ok(analysis) => to_js(&AnalysisResult::from(&analysis)),
            Err(e) => {
                get_logger().error(LogComponent::Presentation("WasmApi"), &e.to_string());
                Err(to_js_error(e))
            }
        }
    })
}

/// Offline variant of [`load_indicator`] for payloads fetched by the host page
#[wasm_bindgen(js_name = analyzeIndicator)]
pub fn analyze_indicator(symbol: String, payload: JsValue, kind: String, period: Option<u32>) -> Result<JsValue, JsValue> {
    let kind = parse_kind(&kind)?;
    let symbol = crate::domain::indicators::Symbol::new(&symbol).ok_or_else(|| to_js_error(IndicatorError::NoSymbol))?;
    let response = decode_payload(&payload)?;
    let period = resolve_period(kind, period);

    let analysis = analyze(&response, &symbol, kind, period, config().max_points).map_err(to_js_error)?;
    to_js(&AnalysisResult::from(&analysis))
}
