use super::value_objects::{ANALYSIS_PREFIX, IndicatorKind, SeriesPoint};
use crate::domain::errors::{IndicatorError, IndicatorResult};
use crate::domain::logging::LogComponent;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Default number of points kept for charting
pub const DEFAULT_MAX_POINTS: usize = 100;

/// Raw `technicalAnalysis` object: analysis label → date → field → number
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorPayload(pub Map<String, Value>);

impl IndicatorPayload {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body returned by the indicator endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResponse {
    #[serde(rename = "technicalAnalysis", default)]
    pub technical_analysis: Option<IndicatorPayload>,
}

impl IndicatorResponse {
    pub fn payload(&self) -> Option<&IndicatorPayload> {
        self.technical_analysis.as_ref()
    }
}

/// Bounded, oldest-first series decoded from a payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedSeries {
    pub kind: IndicatorKind,
    pub analysis_key: String,
    pub points: Vec<SeriesPoint>,
    /// Dates present in the payload before truncation
    pub available: usize,
}

impl ExtractedSeries {
    /// Point for the most recent date
    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn dates(&self) -> Vec<String> {
        self.points.iter().map(|p| p.date.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub struct IndicatorSeriesExtractor {
    max_points: usize,
}

impl Default for IndicatorSeriesExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POINTS)
    }
}

impl IndicatorSeriesExtractor {
    /// A cap below one is raised to one so a latest point always survives
    pub fn new(max_points: usize) -> Self {
        Self { max_points: max_points.max(1) }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn extract(
        &self,
        payload: Option<&IndicatorPayload>,
        kind: IndicatorKind,
    ) -> IndicatorResult<ExtractedSeries> {
        let payload = match payload {
            Some(p) if !p.is_empty() => p,
            _ => return Err(IndicatorError::EmptyData),
        };

        let (key, body) = Self::locate(payload, kind)?;
        let by_date = body.as_object().ok_or_else(|| {
            IndicatorError::MalformedPayload(format!("'{}' is not an object of dates", key))
        })?;
        if by_date.is_empty() {
            return Err(IndicatorError::EmptyData);
        }

        // Payload order is not trusted; dates are ISO strings and sort chronologically
        let mut entries: Vec<(&String, &Value)> = by_date.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let available = entries.len();
        let skip = available.saturating_sub(self.max_points);

        let points = entries[skip..]
            .iter()
            .map(|(date, entry)| {
                let fields = entry.as_object().ok_or_else(|| {
                    IndicatorError::MalformedPayload(format!("entry for {} is not an object", date))
                })?;
                Ok(SeriesPoint::new(date.as_str(), Self::decode_fields(fields)))
            })
            .collect::<IndicatorResult<Vec<_>>>()?;

        crate::log_debug!(
            LogComponent::Domain("SeriesExtractor"),
            "{}: kept {} of {} points",
            key,
            points.len(),
            available
        );

        Ok(ExtractedSeries { kind, analysis_key: key.clone(), points, available })
    }

    /// Exactly one `Technical Analysis: <KIND>` key for `kind` must exist;
    /// analyses of other kinds alongside it are ignored
    fn locate(payload: &IndicatorPayload, kind: IndicatorKind) -> IndicatorResult<(&String, &Value)> {
        let mut candidates = payload.0.iter().filter(|(key, _)| {
            key.strip_prefix(ANALYSIS_PREFIX)
                .is_some_and(|label| label.trim().eq_ignore_ascii_case(kind.analysis_label()))
        });
        let (key, body) = candidates.next().ok_or_else(|| {
            IndicatorError::MalformedPayload(format!(
                "no '{} {}' key in payload",
                ANALYSIS_PREFIX,
                kind.analysis_label()
            ))
        })?;
        if let Some((other, _)) = candidates.next() {
            return Err(IndicatorError::MalformedPayload(format!(
                "ambiguous analysis keys '{}' and '{}'",
                key, other
            )));
        }
        Ok((key, body))
    }

    fn decode_fields(fields: &Map<String, Value>) -> BTreeMap<String, f64> {
        fields.iter().map(|(name, raw)| (name.clone(), parse_number(raw))).collect()
    }
}

/// Numbers arrive as strings; anything unreadable becomes NaN
fn parse_number(raw: &Value) -> f64 {
    match raw {
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
