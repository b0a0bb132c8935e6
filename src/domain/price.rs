//! Synthetic price feed: price points, the bounded history, and the
//! random-walk generator.
//!
//! The walk adds a uniform delta in `[-max_step, +max_step]` to the previous
//! price and clamps into `[floor, ceiling]`, so every output is finite and
//! in-band. Randomness comes through the [`RandomSource`] port so tests can
//! feed fixed sequences.

use std::collections::VecDeque;

use crate::ports::random_port::RandomSource;

/// One observed price. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp_ms: u64,
    pub value: f64,
}

/// Time-ordered price history bounded at `capacity`; pushing beyond it drops
/// the oldest point.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    points: VecDeque<PricePoint>,
    capacity: usize,
}

impl PriceHistory {
    pub fn new(capacity: usize) -> Self {
        PriceHistory {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: PricePoint) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.back()
    }

    pub fn points(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }

    /// Snapshot of the raw values, oldest first.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Next price of the bounded random walk. Pure given the injected source.
pub fn next_price(
    prev: f64,
    max_step: f64,
    floor: f64,
    ceiling: f64,
    rng: &mut dyn RandomSource,
) -> f64 {
    let delta = (rng.next_fraction() - 0.5) * 2.0 * max_step;
    (prev + delta).clamp(floor, ceiling)
}
