use insight_dashboard_wasm::domain::errors::IndicatorError;
use insight_dashboard_wasm::domain::indicators::{
    IndicatorKind, IndicatorPayload, IndicatorSeriesExtractor, fields,
};
use serde_json::{Map, Value, json};

fn day(i: usize) -> String {
    let month = i / 28 + 1;
    let day = i % 28 + 1;
    format!("2024-{:02}-{:02}", month, day)
}

fn rsi_payload(count: usize) -> IndicatorPayload {
    let mut dates = Map::new();
    // newest first, like the upstream API
    for i in (0..count).rev() {
        dates.insert(day(i), json!({ "RSI": format!("{}.5", i) }));
    }
    let mut root = Map::new();
    root.insert("Meta Data".to_string(), json!({ "1: Symbol": "AAPL" }));
    root.insert("Technical Analysis: RSI".to_string(), Value::Object(dates));
    IndicatorPayload(root)
}

fn payload(value: Value) -> IndicatorPayload {
    match value {
        Value::Object(map) => IndicatorPayload(map),
        _ => panic!("fixture must be an object"),
    }
}

#[test]
fn keeps_newest_hundred_oldest_first() {
    let payload = rsi_payload(150);
    let series = IndicatorSeriesExtractor::default()
        .extract(Some(&payload), IndicatorKind::Rsi)
        .unwrap();

    assert_eq!(series.len(), 100);
    assert_eq!(series.available, 150);
    assert_eq!(series.points.first().unwrap().date, day(50));
    assert_eq!(series.latest().unwrap().date, day(149));
    assert_eq!(series.latest().unwrap().value(fields::RSI), Some(149.5));
    assert!(series.points.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn short_series_is_kept_whole() {
    let payload = rsi_payload(5);
    let series = IndicatorSeriesExtractor::new(100)
        .extract(Some(&payload), IndicatorKind::Rsi)
        .unwrap();
    assert_eq!(series.dates(), (0..5).map(day).collect::<Vec<_>>());
    assert_eq!(series.analysis_key, "Technical Analysis: RSI");
}

#[test]
fn zero_cap_still_keeps_latest_point() {
    let extractor = IndicatorSeriesExtractor::new(0);
    assert_eq!(extractor.max_points(), 1);

    let payload = rsi_payload(3);
    let series = extractor.extract(Some(&payload), IndicatorKind::Rsi).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.latest().unwrap().date, day(2));
}

#[test]
fn missing_or_empty_payload_is_empty_data() {
    let extractor = IndicatorSeriesExtractor::default();
    assert_eq!(extractor.extract(None, IndicatorKind::Sma), Err(IndicatorError::EmptyData));
    assert_eq!(
        extractor.extract(Some(&IndicatorPayload::default()), IndicatorKind::Sma),
        Err(IndicatorError::EmptyData)
    );

    let no_dates = payload(json!({ "Technical Analysis: SMA": {} }));
    assert_eq!(extractor.extract(Some(&no_dates), IndicatorKind::Sma), Err(IndicatorError::EmptyData));
}

#[test]
fn payload_without_analysis_key_is_malformed() {
    let payload = payload(json!({ "Meta Data": {}, "Note": "rate limited" }));
    let result = IndicatorSeriesExtractor::default().extract(Some(&payload), IndicatorKind::Sma);
    assert!(matches!(result, Err(IndicatorError::MalformedPayload(_))));
}

#[test]
fn two_keys_for_same_kind_are_ambiguous() {
    let payload = payload(json!({
        "Technical Analysis: SMA": { "2024-01-01": { "SMA": "1.0" } },
        "Technical Analysis:SMA": { "2024-01-01": { "SMA": "2.0" } },
    }));
    let result = IndicatorSeriesExtractor::default().extract(Some(&payload), IndicatorKind::Sma);
    match result {
        Err(IndicatorError::MalformedPayload(message)) => assert!(message.contains("ambiguous")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn sibling_analysis_of_another_kind_is_ignored() {
    let payload = payload(json!({
        "Technical Analysis: SMA": { "2024-01-01": { "SMA": "1.5" } },
        "Technical Analysis: EMA": { "2024-01-01": { "EMA": "9.0" } },
    }));
    let series = IndicatorSeriesExtractor::default()
        .extract(Some(&payload), IndicatorKind::Sma)
        .unwrap();
    assert_eq!(series.analysis_key, "Technical Analysis: SMA");
    assert_eq!(series.latest().unwrap().value(fields::SMA), Some(1.5));

    let ema = IndicatorSeriesExtractor::default()
        .extract(Some(&payload), IndicatorKind::Ema)
        .unwrap();
    assert_eq!(ema.latest().unwrap().value(fields::EMA), Some(9.0));
}

#[test]
fn analysis_key_must_match_kind() {
    let payload = payload(json!({ "Technical Analysis: SMA": { "2024-01-01": { "SMA": "1.0" } } }));
    let result = IndicatorSeriesExtractor::default().extract(Some(&payload), IndicatorKind::Rsi);
    assert!(matches!(result, Err(IndicatorError::MalformedPayload(_))));
}

#[test]
fn bollinger_key_is_matched_by_label() {
    let payload = payload(json!({
        "Technical Analysis: BBANDS": {
            "2024-01-02": { "Real_Upper_Band": "3.0", "Real_Middle_Band": "2.0", "Real_Lower_Band": "1.0" }
        }
    }));
    let series = IndicatorSeriesExtractor::default()
        .extract(Some(&payload), IndicatorKind::BollingerBands)
        .unwrap();
    let latest = series.latest().unwrap();
    assert_eq!(latest.value(fields::UPPER_BAND), Some(3.0));
    assert_eq!(latest.value(fields::LOWER_BAND), Some(1.0));
}

#[test]
fn unreadable_values_become_nan() {
    let payload = payload(json!({
        "Technical Analysis: MACD": {
            "2024-01-01": { "MACD": "n/a", "MACD_Signal": 0.25, "MACD_Hist": null }
        }
    }));
    let series = IndicatorSeriesExtractor::default()
        .extract(Some(&payload), IndicatorKind::Macd)
        .unwrap();
    let latest = series.latest().unwrap();
    assert!(latest.value(fields::MACD).unwrap().is_nan());
    assert_eq!(latest.value(fields::MACD_SIGNAL), Some(0.25));
    assert!(latest.value(fields::MACD_HIST).unwrap().is_nan());
}

#[test]
fn non_object_dates_are_malformed() {
    let payload = payload(json!({ "Technical Analysis: SMA": ["2024-01-01"] }));
    let result = IndicatorSeriesExtractor::default().extract(Some(&payload), IndicatorKind::Sma);
    assert!(matches!(result, Err(IndicatorError::MalformedPayload(_))));
}
