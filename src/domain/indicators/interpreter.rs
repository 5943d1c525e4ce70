use super::value_objects::{
    Classification, FormattedValue, IndicatorKind, Interpretation, SeriesPoint, SignalLabel,
};
use crate::domain::errors::{IndicatorError, IndicatorResult};

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

const RSI_OVERBOUGHT_TEXT: &str = "Stock may be overvalued. Consider this as a potential sell signal.";
const RSI_OVERSOLD_TEXT: &str = "Stock may be undervalued. Consider this as a potential buy signal.";
const RSI_NEUTRAL_TEXT: &str = "Stock is in neutral territory. No strong buy or sell signal.";
const MACD_BULLISH_TEXT: &str = "MACD above signal line suggests upward momentum.";
const MACD_BEARISH_TEXT: &str = "MACD below signal line suggests downward momentum.";
const MOVING_AVERAGE_TEXT: &str = "Moving averages help identify trend direction. \
     Price above MA suggests uptrend, below suggests downtrend.";
const BOLLINGER_TEXT: &str = "Bands show volatility. Price near upper band may indicate overbought, \
     near lower band may indicate oversold. Wider bands suggest higher volatility.";

/// Threshold rules applied to the latest point of a series
pub struct IndicatorInterpreter;

impl IndicatorInterpreter {
    pub fn interpret(
        kind: IndicatorKind,
        latest: &SeriesPoint,
        period: Option<u32>,
    ) -> IndicatorResult<Interpretation> {
        let title = kind.display_name(period);
        let required = kind.required_fields();
        let found = required
            .iter()
            .map(|field| require(latest, field))
            .collect::<IndicatorResult<Vec<f64>>>()?;

        let (values, classification, rationale) = match (kind, found.as_slice()) {
            (IndicatorKind::Sma | IndicatorKind::Ema, &[value]) => {
                (vec![formatted("Latest value", value, 2)], None, MOVING_AVERAGE_TEXT.to_string())
            }
            (IndicatorKind::Rsi, &[rsi]) => {
                let classification = classify_rsi(rsi);
                let rationale = classification.rationale.clone();
                (vec![formatted("RSI", rsi, 2)], Some(classification), rationale)
            }
            (IndicatorKind::Macd, &[macd, signal, hist]) => {
                let classification = classify_macd(hist);
                let rationale = classification.rationale.clone();
                (
                    vec![
                        formatted("MACD", macd, 4),
                        formatted("Signal", signal, 4),
                        formatted("Histogram", hist, 4),
                    ],
                    Some(classification),
                    rationale,
                )
            }
            (IndicatorKind::BollingerBands, &[upper, middle, lower]) => (
                vec![
                    formatted("Upper", upper, 2),
                    formatted("Middle", middle, 2),
                    formatted("Lower", lower, 2),
                ],
                None,
                BOLLINGER_TEXT.to_string(),
            ),
            // required_fields and the arms above disagree on arity
            _ => return Err(IndicatorError::MissingField(required.join(", "))),
        };

        Ok(Interpretation { kind, title, date: latest.date.clone(), values, classification, rationale })
    }
}

/// Both bounds are exclusive: exactly 70 or 30 stays neutral
pub fn classify_rsi(value: f64) -> Classification {
    if value > RSI_OVERBOUGHT {
        Classification::new(SignalLabel::Overbought, RSI_OVERBOUGHT_TEXT)
    } else if value < RSI_OVERSOLD {
        Classification::new(SignalLabel::Oversold, RSI_OVERSOLD_TEXT)
    } else {
        Classification::new(SignalLabel::Neutral, RSI_NEUTRAL_TEXT)
    }
}

/// A zero histogram counts as bearish; there is no neutral MACD state
pub fn classify_macd(hist: f64) -> Classification {
    if hist > 0.0 {
        Classification::new(SignalLabel::Bullish, MACD_BULLISH_TEXT)
    } else {
        Classification::new(SignalLabel::Bearish, MACD_BEARISH_TEXT)
    }
}

fn require(point: &SeriesPoint, field: &str) -> IndicatorResult<f64> {
    point.value(field).ok_or_else(|| IndicatorError::MissingField(field.to_string()))
}

fn formatted(name: &'static str, value: f64, decimals: usize) -> FormattedValue {
    FormattedValue { name, text: format!("{:.*}", decimals, value) }
}
