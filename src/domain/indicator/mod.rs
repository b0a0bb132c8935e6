//! Technical indicator series.
//!
//! Every calculate function is a pure function of a price slice and returns a
//! series the same length as its input, positionally aligned: index `i` of
//! the output corresponds to index `i` of the input, and indices without
//! enough history hold `None` rather than a silently-wrong number. Series
//! are recomputed from scratch on every call; no smoothing state survives
//! between calls.

pub mod ema;
pub mod rsi;
pub mod sma;

use std::fmt;

/// Indicator identity plus parameters. Doubles as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
}

/// A computed series, aligned one-to-one with its source history.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub kind: IndicatorKind,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    /// Count of defined (non-warmup) values.
    pub fn defined(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Dispatch to the matching calculate function.
pub fn calculate(kind: IndicatorKind, data: &[f64]) -> IndicatorSeries {
    match kind {
        IndicatorKind::Sma(period) => sma::calculate_sma(data, period),
        IndicatorKind::Ema(period) => ema::calculate_ema(data, period),
        IndicatorKind::Rsi(period) => rsi::calculate_rsi(data, period),
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Sma(period) => write!(f, "SMA({})", period),
            IndicatorKind::Ema(period) => write!(f, "EMA({})", period),
            IndicatorKind::Rsi(period) => write!(f, "RSI({})", period),
        }
    }
}
