//! Relative Strength Index, plain-window variant.
//!
//! The value at index `i` looks at the `period` consecutive first differences
//! ending with `data[i] - data[i-1]`. Average gain and average loss are plain
//! window sums divided by `period`, recomputed per window, NOT Wilder's
//! running exponential average. When the window has no losses the divisor
//! falls back to 1, so RSI saturates toward 100 instead of dividing by zero;
//! a flat window has zero gain too and lands on 0. Output compatibility with
//! this windowing is the contract, so do not "fix" it to textbook RSI.
//!
//! RSI = 100 - 100 / (1 + avg_gain / max(avg_loss, fallback)) stays in
//! [0, 100] for any finite input.

use crate::domain::indicator::{IndicatorKind, IndicatorSeries};

pub fn calculate_rsi(data: &[f64], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(data.len());

    if period == 0 || data.len() < period + 1 {
        values.resize(data.len(), None);
        return IndicatorSeries {
            kind: IndicatorKind::Rsi(period),
            values,
        };
    }

    let diffs: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();

    for i in 0..data.len() {
        if i < period {
            values.push(None);
            continue;
        }

        // Window of diffs ending with data[i] - data[i-1].
        let window = &diffs[i - period..i];
        let avg_gain = window.iter().filter(|&&d| d > 0.0).sum::<f64>() / period as f64;
        let avg_loss =
            window.iter().filter(|&&d| d < 0.0).map(|d| -d).sum::<f64>() / period as f64;

        let divisor = if avg_loss == 0.0 { 1.0 } else { avg_loss };
        let rs = avg_gain / divisor;
        values.push(Some(100.0 - 100.0 / (1.0 + rs)));
    }

    IndicatorSeries {
        kind: IndicatorKind::Rsi(period),
        values,
    }
}
