use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Field names used by the upstream technical-analysis payload
pub mod fields {
    pub const SMA: &str = "SMA";
    pub const EMA: &str = "EMA";
    pub const RSI: &str = "RSI";
    pub const MACD: &str = "MACD";
    pub const MACD_SIGNAL: &str = "MACD_Signal";
    pub const MACD_HIST: &str = "MACD_Hist";
    pub const UPPER_BAND: &str = "Real_Upper_Band";
    pub const MIDDLE_BAND: &str = "Real_Middle_Band";
    pub const LOWER_BAND: &str = "Real_Lower_Band";
}

/// Prefix shared by every analysis key in an indicator payload
pub const ANALYSIS_PREFIX: &str = "Technical Analysis:";

/// Value Object - ticker symbol, always upper-case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: &str) -> Option<Self> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Indicator kinds supported by the dashboard
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum IndicatorKind {
    #[strum(serialize = "sma")]
    #[serde(rename = "sma")]
    Sma,

    #[strum(serialize = "ema")]
    #[serde(rename = "ema")]
    Ema,

    #[strum(serialize = "rsi")]
    #[serde(rename = "rsi")]
    Rsi,

    #[strum(serialize = "macd")]
    #[serde(rename = "macd")]
    Macd,

    #[strum(serialize = "bbands")]
    #[serde(rename = "bbands")]
    BollingerBands,
}

impl IndicatorKind {
    /// Path segment of the indicator endpoint
    pub fn endpoint(&self) -> &str {
        self.as_ref()
    }

    /// Suffix of the `Technical Analysis: <KIND>` key
    pub fn analysis_label(&self) -> &'static str {
        match self {
            Self::Sma => "SMA",
            Self::Ema => "EMA",
            Self::Rsi => "RSI",
            Self::Macd => "MACD",
            Self::BollingerBands => "BBANDS",
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Sma => &[fields::SMA],
            Self::Ema => &[fields::EMA],
            Self::Rsi => &[fields::RSI],
            Self::Macd => &[fields::MACD, fields::MACD_SIGNAL, fields::MACD_HIST],
            Self::BollingerBands => &[fields::UPPER_BAND, fields::MIDDLE_BAND, fields::LOWER_BAND],
        }
    }

    /// MACD uses fixed 12/26/9 windows and takes no period
    pub fn uses_period(&self) -> bool {
        !matches!(self, Self::Macd)
    }

    pub fn default_period(&self) -> Option<u32> {
        match self {
            Self::Sma | Self::Ema | Self::BollingerBands => Some(20),
            Self::Rsi => Some(14),
            Self::Macd => None,
        }
    }

    /// Human name, e.g. `RSI (14)` or `MACD`
    pub fn display_name(&self, period: Option<u32>) -> String {
        let base = match self {
            Self::Sma => "SMA",
            Self::Ema => "EMA",
            Self::Rsi => "RSI",
            Self::Macd => return "MACD".to_string(),
            Self::BollingerBands => "Bollinger Bands",
        };
        match period {
            Some(p) => format!("{} ({})", base, p),
            None => base.to_string(),
        }
    }
}

/// One dated observation of an indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: String,
    pub values: BTreeMap<String, f64>,
}

impl SeriesPoint {
    pub fn new(date: impl Into<String>, values: BTreeMap<String, f64>) -> Self {
        Self { date: date.into(), values }
    }

    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr, Serialize)]
pub enum SignalLabel {
    Bullish,
    Bearish,
    Overbought,
    Oversold,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: SignalLabel,
    pub rationale: String,
}

impl Classification {
    pub fn new(label: SignalLabel, rationale: &str) -> Self {
        Self { label, rationale: rationale.to_string() }
    }
}

/// Latest value rendered for display, e.g. `("Upper", "151.20")`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedValue {
    pub name: &'static str,
    pub text: String,
}

/// Result of interpreting the latest point of a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    pub kind: IndicatorKind,
    pub title: String,
    pub date: String,
    pub values: Vec<FormattedValue>,
    /// Present only for kinds with threshold rules (RSI, MACD)
    pub classification: Option<Classification>,
    pub rationale: String,
}

impl Interpretation {
    /// `RSI: 72.35` / `Upper: 1.00, Middle: 0.50, Lower: 0.00`
    pub fn summary(&self) -> String {
        self.values
            .iter()
            .map(|v| format!("{}: {}", v.name, v.text))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn label(&self) -> Option<SignalLabel> {
        self.classification.as_ref().map(|c| c.label)
    }
}
