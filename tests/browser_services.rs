#![cfg(target_arch = "wasm32")]
use insight_dashboard_wasm::domain::chart::{ChartHandle, ChartProjector, SeriesRenderer};
use insight_dashboard_wasm::domain::indicators::{IndicatorKind, SeriesPoint};
use insight_dashboard_wasm::domain::logging::{LogComponent, LogEntry, LogLevel, Logger, TimeProvider};
use insight_dashboard_wasm::infrastructure::{BrowserTimeProvider, CanvasSeriesRenderer, ConsoleLogger};
use js_sys::Date;
use std::collections::BTreeMap;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn time_provider_formats_local_clock() {
    let ts = 1_700_000_000_123u64;
    let date = Date::new(&JsValue::from_f64(ts as f64));
    assert_eq!(
        BrowserTimeProvider.format_timestamp(ts),
        format!(
            "{:02}:{:02}:{:02}.123",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds()
        )
    );
}

#[wasm_bindgen_test]
fn time_provider_reads_wall_clock() {
    let before = Date::now() as u64;
    assert!(BrowserTimeProvider.current_timestamp() >= before);
}

#[wasm_bindgen_test]
fn console_logger_filters_by_level() {
    let logger = ConsoleLogger::new_production();
    assert!(!logger.accepts(LogLevel::Debug));
    assert!(logger.accepts(LogLevel::Warn));
    logger.log(LogEntry::new(LogLevel::Info, LogComponent::Infrastructure("Test"), "console smoke test"));
}

#[wasm_bindgen_test]
fn dashed_rsi_guides_leave_solid_stroke_behind() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();
    canvas.set_id("rsi-chart-test");
    document.body().unwrap().append_child(&canvas).unwrap();

    let points: Vec<SeriesPoint> = [45.0, 72.0, 28.0]
        .iter()
        .enumerate()
        .map(|(i, v)| SeriesPoint::new(format!("2024-01-0{}", i + 1), BTreeMap::from([("RSI".to_string(), *v)])))
        .collect();
    let projection = ChartProjector::project(&points, IndicatorKind::Rsi, "RSI (14)");

    let mut renderer = CanvasSeriesRenderer::new("rsi-chart-test", 320, 200);
    let handle = renderer.render("AAPL - RSI (14)", &projection).unwrap();

    let context: CanvasRenderingContext2d =
        canvas.get_context("2d").unwrap().unwrap().dyn_into().unwrap();
    assert_eq!(context.get_line_dash().length(), 0);

    handle.destroy();
    canvas.remove();
}
