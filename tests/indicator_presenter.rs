use insight_dashboard_wasm::domain::errors::IndicatorError;
use insight_dashboard_wasm::domain::indicators::{IndicatorInterpreter, IndicatorKind, Interpretation, SeriesPoint};
use insight_dashboard_wasm::presentation::{AlertTone, IndicatorPresenter};
use std::collections::BTreeMap;

fn interpret(kind: IndicatorKind, values: &[(&str, f64)], period: Option<u32>) -> Interpretation {
    let values: BTreeMap<String, f64> = values.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    IndicatorInterpreter::interpret(kind, &SeriesPoint::new("2024-03-01", values), period).unwrap()
}

#[test]
fn overbought_rsi_is_danger_with_value_headline() {
    let view = IndicatorPresenter::present(&interpret(IndicatorKind::Rsi, &[("RSI", 75.0)], Some(14)));

    assert_eq!(view.tone, AlertTone::Danger);
    assert_eq!(view.alert_class, "alert alert-danger");
    assert_eq!(view.headline, "RSI: 75.00");
    assert_eq!(view.detail, "");
    let badge = view.badge.unwrap();
    assert_eq!(badge.text, "Overbought");
    assert_eq!(badge.class, "badge bg-danger");
}

#[test]
fn neutral_rsi_is_info() {
    let view = IndicatorPresenter::present(&interpret(IndicatorKind::Rsi, &[("RSI", 50.0)], Some(14)));
    assert_eq!(view.tone, AlertTone::Info);
    assert_eq!(view.badge.unwrap().class, "badge bg-secondary");
}

#[test]
fn bullish_macd_is_success() {
    let view = IndicatorPresenter::present(&interpret(
        IndicatorKind::Macd,
        &[("MACD", 1.0), ("MACD_Signal", 0.5), ("MACD_Hist", 0.5)],
        None,
    ));

    assert_eq!(view.tone, AlertTone::Success);
    assert_eq!(view.headline, "MACD");
    assert_eq!(view.detail, "MACD: 1.0000, Signal: 0.5000, Histogram: 0.5000");
    assert_eq!(view.badge.unwrap().text, "Bullish Signal");
}

#[test]
fn moving_average_has_no_badge() {
    let view = IndicatorPresenter::present(&interpret(IndicatorKind::Sma, &[("SMA", 101.5)], Some(20)));
    assert_eq!(view.tone, AlertTone::Info);
    assert_eq!(view.headline, "SMA (20)");
    assert_eq!(view.detail, "Latest value: 101.50");
    assert!(view.badge.is_none());
    assert!(!view.rationale.is_empty());
}

#[test]
fn empty_data_is_a_warning() {
    let view = IndicatorPresenter::present_error(&IndicatorError::EmptyData);
    assert_eq!(view.tone, AlertTone::Warning);
    assert_eq!(view.headline, "No data available");
}

#[test]
fn malformed_payload_is_an_error() {
    let view = IndicatorPresenter::present_error(&IndicatorError::MalformedPayload("no key".to_string()));
    assert_eq!(view.tone, AlertTone::Danger);
    assert_eq!(view.headline, "Invalid indicator data format: no key");
}
