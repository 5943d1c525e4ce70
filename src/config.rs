use crate::domain::history::DEFAULT_PAGE_SIZE;
use crate::domain::indicators::{DEFAULT_MAX_POINTS, IndicatorKind};
use crate::domain::logging::LogLevel;
use once_cell::sync::OnceCell;
use serde::Deserialize;

/// Runtime settings; every field falls back to its default when absent
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Prefix for every API path; empty means same origin
    pub api_base_url: String,
    pub max_points: usize,
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
    pub interval: String,
    pub series_type: String,
    pub periods: PeriodDefaults,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PeriodDefaults {
    pub sma: u32,
    pub ema: u32,
    pub rsi: u32,
    pub bbands: u32,
}

impl Default for PeriodDefaults {
    fn default() -> Self {
        Self {
            sma: IndicatorKind::Sma.default_period().unwrap_or(20),
            ema: IndicatorKind::Ema.default_period().unwrap_or(20),
            rsi: IndicatorKind::Rsi.default_period().unwrap_or(14),
            bbands: IndicatorKind::BollingerBands.default_period().unwrap_or(20),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            max_points: DEFAULT_MAX_POINTS,
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 25, 50, 100],
            interval: "daily".to_string(),
            series_type: "close".to_string(),
            periods: PeriodDefaults::default(),
            log_level: "debug".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn period_for(&self, kind: IndicatorKind) -> Option<u32> {
        match kind {
            IndicatorKind::Sma => Some(self.periods.sma),
            IndicatorKind::Ema => Some(self.periods.ema),
            IndicatorKind::Rsi => Some(self.periods.rsi),
            IndicatorKind::BollingerBands => Some(self.periods.bbands),
            IndicatorKind::Macd => None,
        }
    }

    /// Unknown names fall back to `Info`
    pub fn log_level(&self) -> LogLevel {
        self.log_level.parse().unwrap_or(LogLevel::Info)
    }
}

static CONFIG: OnceCell<DashboardConfig> = OnceCell::new();

/// Install the configuration once; returns false if one was already set
pub fn init_config(config: DashboardConfig) -> bool {
    CONFIG.set(config).is_ok()
}

pub fn config() -> &'static DashboardConfig {
    CONFIG.get_or_init(DashboardConfig::default)
}
