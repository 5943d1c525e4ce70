use super::value_objects::{Color, SeriesStyle};
use crate::domain::indicators::{
    IndicatorKind, RSI_OVERBOUGHT, RSI_OVERSOLD, SeriesPoint, fields,
};
use serde::Serialize;

/// One named plot line or bar set, index-aligned with the projection labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedSeries {
    pub label: String,
    pub points: Vec<f64>,
    pub style: SeriesStyle,
}

impl ProjectedSeries {
    fn new(label: &str, points: Vec<f64>, style: SeriesStyle) -> Self {
        Self { label: label.to_string(), points, style }
    }
}

/// Everything the charting capability needs to draw an indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartProjection {
    pub labels: Vec<String>,
    pub series: Vec<ProjectedSeries>,
}

impl ChartProjection {
    pub fn get(&self, label: &str) -> Option<&ProjectedSeries> {
        self.series.iter().find(|s| s.label == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Pair of series indices whose enclosed region is shaded
    pub fn fill_between(&self) -> Option<(usize, usize)> {
        self.series
            .iter()
            .enumerate()
            .find_map(|(i, s)| s.style.fill.map(|f| (f.to_series, i)))
    }

    /// Finite min/max across every series, ignoring NaN gaps
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

pub struct ChartProjector;

impl ChartProjector {
    pub fn project(points: &[SeriesPoint], kind: IndicatorKind, name: &str) -> ChartProjection {
        let column = |field: &str| -> Vec<f64> {
            points.iter().map(|p| p.value(field).unwrap_or(f64::NAN)).collect()
        };

        let series = match kind {
            IndicatorKind::Sma => {
                vec![ProjectedSeries::new(name, column(fields::SMA), SeriesStyle::line(Color::TEAL))]
            }
            IndicatorKind::Ema => {
                vec![ProjectedSeries::new(name, column(fields::EMA), SeriesStyle::line(Color::TEAL))]
            }
            IndicatorKind::Rsi => vec![
                ProjectedSeries::new("RSI", column(fields::RSI), SeriesStyle::line(Color::BLUE)),
                ProjectedSeries::new(
                    "Overbought (70)",
                    vec![RSI_OVERBOUGHT; points.len()],
                    SeriesStyle::dashed(Color::RED.with_alpha(0.5)),
                ),
                ProjectedSeries::new(
                    "Oversold (30)",
                    vec![RSI_OVERSOLD; points.len()],
                    SeriesStyle::dashed(Color::TEAL.with_alpha(0.5)),
                ),
            ],
            IndicatorKind::Macd => vec![
                ProjectedSeries::new("MACD", column(fields::MACD), SeriesStyle::line(Color::BLUE)),
                ProjectedSeries::new("Signal", column(fields::MACD_SIGNAL), SeriesStyle::line(Color::ORANGE)),
                ProjectedSeries::new(
                    "Histogram",
                    column(fields::MACD_HIST),
                    SeriesStyle::bars(Color::TEAL.with_alpha(0.5)),
                ),
            ],
            IndicatorKind::BollingerBands => vec![
                ProjectedSeries::new(
                    "Upper Band",
                    column(fields::UPPER_BAND),
                    SeriesStyle::line(Color::RED.with_alpha(0.8)),
                ),
                ProjectedSeries::new(
                    "Middle Band (SMA)",
                    column(fields::MIDDLE_BAND),
                    SeriesStyle::line(Color::BLUE),
                ),
                ProjectedSeries::new(
                    "Lower Band",
                    column(fields::LOWER_BAND),
                    SeriesStyle::line(Color::TEAL.with_alpha(0.8)).fill_to(0),
                ),
            ],
        };

        ChartProjection { labels: points.iter().map(|p| p.date.clone()).collect(), series }
    }
}
