//! OHLCV candle aggregation.
//!
//! Candles are recomputed wholesale from the current price history on every
//! tick; there is no incremental merge. Each candle covers one contiguous
//! chunk of `chunk_size` points (the final chunk may be shorter but is still
//! emitted), and only the most recent `max_candles` are kept. Volume is a
//! display placeholder drawn from the injected random source; open/high/low/
//! close are deterministic for identical input.

use crate::domain::price::PricePoint;
use crate::ports::random_port::RandomSource;

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub timestamp_ms: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Aggregate `history` into candles of `chunk_size` points, keeping the most
/// recent `max_candles`. Empty history yields an empty vec.
pub fn aggregate_candles(
    history: &[PricePoint],
    chunk_size: usize,
    max_candles: usize,
    rng: &mut dyn RandomSource,
) -> Vec<Candle> {
    if history.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let mut candles: Vec<Candle> = history
        .chunks(chunk_size)
        .map(|chunk| {
            let mut high = chunk[0].value;
            let mut low = chunk[0].value;
            for p in chunk {
                high = high.max(p.value);
                low = low.min(p.value);
            }
            Candle {
                timestamp_ms: chunk[0].timestamp_ms,
                open: chunk[0].value,
                high,
                low,
                close: chunk[chunk.len() - 1].value,
                volume: rng.next_fraction() * 1000.0 + 500.0,
            }
        })
        .collect();

    if candles.len() > max_candles {
        candles.drain(..candles.len() - max_candles);
    }
    candles
}
