//! Exponential Moving Average.
//!
//! k = 2/(period+1). The seed at index `period - 1` is the simple mean of the
//! first `period` values; after that `ema = (data[i] - prev) * k + prev`.
//! Shorter histories produce an entirely undefined series. The recursion
//! means a changed history invalidates everything downstream, so every call
//! replays from the seed rather than patching incrementally.

use crate::domain::indicator::{IndicatorKind, IndicatorSeries};

pub fn calculate_ema(data: &[f64], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(data.len());

    if period == 0 || data.len() < period {
        values.resize(data.len(), None);
        return IndicatorSeries {
            kind: IndicatorKind::Ema(period),
            values,
        };
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = 0.0;
    let mut sum = 0.0;

    for (i, &value) in data.iter().enumerate() {
        if i + 1 < period {
            sum += value;
            values.push(None);
        } else if i + 1 == period {
            sum += value;
            ema = sum / period as f64;
            values.push(Some(ema));
        } else {
            ema = (value - ema) * k + ema;
            values.push(Some(ema));
        }
    }

    IndicatorSeries {
        kind: IndicatorKind::Ema(period),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn warmup_then_defined() {
        let series = calculate_ema(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);

        assert!(series.values[0].is_none());
        assert!(series.values[1].is_none());
        assert!(series.values[2].is_some());
        assert!(series.values[3].is_some());
        assert!(series.values[4].is_some());
    }

    #[test]
    fn seed_is_simple_mean_of_first_period() {
        let series = calculate_ema(&[10.0, 20.0, 30.0], 3);
        assert_relative_eq!(series.values[2].unwrap(), 20.0);
    }

    #[test]
    fn recursion_from_seed() {
        let series = calculate_ema(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);

        let k = 2.0 / 4.0;
        let seed = 20.0;
        let ema_3 = (40.0 - seed) * k + seed;
        let ema_4 = (50.0 - ema_3) * k + ema_3;

        assert_relative_eq!(series.values[3].unwrap(), ema_3);
        assert_relative_eq!(series.values[4].unwrap(), ema_4);
    }

    #[test]
    fn short_history_is_entirely_undefined() {
        let series = calculate_ema(&[10.0, 20.0], 3);
        assert_eq!(series.values, vec![None, None]);
    }

    #[test]
    fn constant_input_stays_constant() {
        let series = calculate_ema(&[100.0; 6], 3);
        for value in series.values.iter().skip(2) {
            assert_relative_eq!(value.unwrap(), 100.0);
        }
    }

    #[test]
    fn period_one_tracks_input() {
        let data = [10.0, 20.0, 30.0];
        let series = calculate_ema(&data, 1);

        // k = 1 so each step lands exactly on the input.
        for (i, &v) in data.iter().enumerate() {
            assert_relative_eq!(series.values[i].unwrap(), v);
        }
    }

    #[test]
    fn empty_data() {
        let series = calculate_ema(&[], 3);
        assert!(series.values.is_empty());
    }

    #[test]
    fn period_zero_is_all_undefined() {
        let series = calculate_ema(&[10.0, 20.0], 0);
        assert_eq!(series.values, vec![None, None]);
    }

    #[test]
    fn recompute_equals_replay_after_history_change() {
        // Appending a point must give the same series as computing the longer
        // history from scratch; there is no hidden incremental state.
        let mut data = vec![10.0, 20.0, 30.0, 40.0];
        let before = calculate_ema(&data, 3);
        data.push(50.0);
        let after = calculate_ema(&data, 3);

        for i in 0..before.values.len() {
            assert_eq!(before.values[i].is_some(), after.values[i].is_some());
            if let (Some(a), Some(b)) = (before.values[i], after.values[i]) {
                assert_relative_eq!(a, b);
            }
        }
    }
}
