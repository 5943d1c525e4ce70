use crate::domain::{
    errors::{IndicatorError, IndicatorResult},
    indicators::{IndicatorKind, Interpretation, SignalLabel},
};
use serde::Serialize;
use strum::AsRefStr;

/// Colour of the interpretation box
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTone {
    #[strum(serialize = "alert-info")]
    Info,
    #[strum(serialize = "alert-success")]
    Success,
    #[strum(serialize = "alert-danger")]
    Danger,
    #[strum(serialize = "alert-warning")]
    Warning,
}

impl AlertTone {
    pub fn for_label(label: SignalLabel) -> Self {
        match label {
            SignalLabel::Overbought | SignalLabel::Bearish => Self::Danger,
            SignalLabel::Oversold | SignalLabel::Bullish => Self::Success,
            SignalLabel::Neutral => Self::Info,
        }
    }

    pub fn class(&self) -> String {
        format!("alert {}", self.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub text: String,
    pub class: &'static str,
}

impl Badge {
    pub fn for_label(label: SignalLabel) -> Self {
        let (text, class) = match label {
            SignalLabel::Overbought => ("Overbought".to_string(), "badge bg-danger"),
            SignalLabel::Oversold => ("Oversold".to_string(), "badge bg-success"),
            SignalLabel::Neutral => ("Neutral".to_string(), "badge bg-secondary"),
            SignalLabel::Bullish => ("Bullish Signal".to_string(), "badge bg-success"),
            SignalLabel::Bearish => ("Bearish Signal".to_string(), "badge bg-danger"),
        };
        Self { text, class }
    }
}

/// Display model of the interpretation box
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorView {
    pub tone: AlertTone,
    pub alert_class: String,
    pub headline: String,
    /// Values line under the headline, empty when the headline carries the value
    pub detail: String,
    pub badge: Option<Badge>,
    pub rationale: String,
}

pub struct IndicatorPresenter;

impl IndicatorPresenter {
    pub fn present(interpretation: &Interpretation) -> IndicatorView {
        let tone = interpretation.label().map(AlertTone::for_label).unwrap_or(AlertTone::Info);

        // RSI puts its value in the headline; the others headline with the indicator name
        let (headline, detail) = match interpretation.kind {
            IndicatorKind::Rsi => (interpretation.summary(), String::new()),
            _ => (interpretation.title.clone(), interpretation.summary()),
        };

        IndicatorView {
            tone,
            alert_class: tone.class(),
            headline,
            detail,
            badge: interpretation.label().map(Badge::for_label),
            rationale: interpretation.rationale.clone(),
        }
    }

    pub fn present_result(result: &IndicatorResult<Interpretation>) -> IndicatorView {
        match result {
            Ok(interpretation) => Self::present(interpretation),
            Err(error) => Self::present_error(error),
        }
    }

    /// Empty state is a warning, anything else an error box
    pub fn present_error(error: &IndicatorError) -> IndicatorView {
        let tone = if error.is_empty_state() { AlertTone::Warning } else { AlertTone::Danger };
        IndicatorView {
            tone,
            alert_class: tone.class(),
            headline: error.to_string(),
            detail: String::new(),
            badge: None,
            rationale: String::new(),
        }
    }
}
