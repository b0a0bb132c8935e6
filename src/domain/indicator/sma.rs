//! Simple Moving Average.
//!
//! Sliding-window arithmetic mean: index `i` holds the mean of the trailing
//! `period` values ending at `i`; the first `period - 1` indices are `None`.

use crate::domain::indicator::{IndicatorKind, IndicatorSeries};

pub fn calculate_sma(data: &[f64], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(data.len());

    if period == 0 {
        values.resize(data.len(), None);
        return IndicatorSeries {
            kind: IndicatorKind::Sma(period),
            values,
        };
    }

    for i in 0..data.len() {
        if i + 1 < period {
            values.push(None);
        } else {
            let window = &data[i + 1 - period..=i];
            values.push(Some(window.iter().sum::<f64>() / period as f64));
        }
    }

    IndicatorSeries {
        kind: IndicatorKind::Sma(period),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn warmup_indices_are_undefined() {
        let series = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);

        assert_eq!(series.values.len(), 5);
        assert!(series.values[0].is_none());
        assert!(series.values[1].is_none());
        assert!(series.values[2].is_some());
        assert!(series.values[3].is_some());
        assert!(series.values[4].is_some());
    }

    #[test]
    fn values_are_trailing_means() {
        let series = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);

        assert_relative_eq!(series.values[2].unwrap(), 20.0);
        assert_relative_eq!(series.values[3].unwrap(), 30.0);
        assert_relative_eq!(series.values[4].unwrap(), 40.0);
    }

    #[test]
    fn period_one_is_identity() {
        let data = [10.0, 20.0, 30.0];
        let series = calculate_sma(&data, 1);

        for (i, &v) in data.iter().enumerate() {
            assert_relative_eq!(series.values[i].unwrap(), v);
        }
    }

    #[test]
    fn period_longer_than_data_is_all_undefined() {
        let series = calculate_sma(&[10.0, 20.0], 5);
        assert_eq!(series.values, vec![None, None]);
    }

    #[test]
    fn empty_data() {
        let series = calculate_sma(&[], 3);
        assert!(series.values.is_empty());
    }

    #[test]
    fn period_zero_is_all_undefined() {
        let series = calculate_sma(&[10.0, 20.0], 0);
        assert_eq!(series.values, vec![None, None]);
    }

    #[test]
    fn kind_carries_period() {
        let series = calculate_sma(&[1.0], 10);
        assert_eq!(series.kind, IndicatorKind::Sma(10));
    }

    proptest! {
        #[test]
        fn every_defined_value_is_the_window_mean(
            data in proptest::collection::vec(45_000.0f64..55_000.0, 1..80),
            period in 1usize..20,
        ) {
            let series = calculate_sma(&data, period);
            prop_assert_eq!(series.values.len(), data.len());

            for (i, value) in series.values.iter().enumerate() {
                if i + 1 < period {
                    prop_assert!(value.is_none());
                } else {
                    let expected =
                        data[i + 1 - period..=i].iter().sum::<f64>() / period as f64;
                    let got = value.expect("defined past warmup");
                    prop_assert!((got - expected).abs() < 1e-6);
                }
            }
        }
    }
}
