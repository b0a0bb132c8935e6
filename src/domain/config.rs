//! Engine configuration: defaults, INI loading, validation.
//!
//! Every key has a default matching the demo the engine drives: BTC-ish
//! prices around 50k, one tick per second, 60-second binary options at an
//! 85% payout.

use crate::domain::error::BinoptError;
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Period of the price tick, in milliseconds.
    pub tick_interval_ms: u64,
    /// Price before the first tick lands.
    pub initial_price: f64,
    /// Lower clamp of the random walk.
    pub price_floor: f64,
    /// Upper clamp of the random walk.
    pub price_ceiling: f64,
    /// Maximum absolute per-tick price change.
    pub max_step: f64,
    /// Retained price points; oldest dropped beyond this.
    pub history_capacity: usize,
    /// Price points per candle.
    pub chunk_size: usize,
    /// Retained candles; oldest dropped beyond this.
    pub max_candles: usize,
    pub sma_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    /// Time from trade open to settlement, in milliseconds.
    pub expiry_ms: u64,
    /// Fraction of the stake returned as profit on a win.
    pub payout_rate: f64,
    pub initial_balance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tick_interval_ms: 1_000,
            initial_price: 50_000.0,
            price_floor: 45_000.0,
            price_ceiling: 55_000.0,
            max_step: 100.0,
            history_capacity: 100,
            chunk_size: 5,
            max_candles: 20,
            sma_period: 10,
            ema_period: 10,
            rsi_period: 14,
            expiry_ms: 60_000,
            payout_rate: 0.85,
            initial_balance: 10_000.0,
        }
    }
}

/// Build a config from `[market]`, `[chart]` and `[trading]` sections,
/// falling back to the defaults above for each missing key.
pub fn build_engine_config(adapter: &dyn ConfigPort) -> EngineConfig {
    let d = EngineConfig::default();
    EngineConfig {
        tick_interval_ms: adapter.get_int(
            "market",
            "tick_interval_ms",
            d.tick_interval_ms as i64,
        ) as u64,
        initial_price: adapter.get_double("market", "initial_price", d.initial_price),
        price_floor: adapter.get_double("market", "price_floor", d.price_floor),
        price_ceiling: adapter.get_double("market", "price_ceiling", d.price_ceiling),
        max_step: adapter.get_double("market", "max_step", d.max_step),
        history_capacity: adapter.get_int(
            "market",
            "history_capacity",
            d.history_capacity as i64,
        ) as usize,
        chunk_size: adapter.get_int("chart", "chunk_size", d.chunk_size as i64) as usize,
        max_candles: adapter.get_int("chart", "max_candles", d.max_candles as i64) as usize,
        sma_period: adapter.get_int("chart", "sma_period", d.sma_period as i64) as usize,
        ema_period: adapter.get_int("chart", "ema_period", d.ema_period as i64) as usize,
        rsi_period: adapter.get_int("chart", "rsi_period", d.rsi_period as i64) as usize,
        expiry_ms: adapter.get_int("trading", "expiry_ms", d.expiry_ms as i64) as u64,
        payout_rate: adapter.get_double("trading", "payout_rate", d.payout_rate),
        initial_balance: adapter.get_double("trading", "initial_balance", d.initial_balance),
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> BinoptError {
    BinoptError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason: reason.into(),
    }
}

pub fn validate_engine_config(config: &EngineConfig) -> Result<(), BinoptError> {
    if config.tick_interval_ms == 0 {
        return Err(invalid("market", "tick_interval_ms", "must be positive"));
    }
    if !(config.price_floor < config.price_ceiling) {
        return Err(invalid(
            "market",
            "price_floor",
            "must be below price_ceiling",
        ));
    }
    if !config.initial_price.is_finite()
        || config.initial_price < config.price_floor
        || config.initial_price > config.price_ceiling
    {
        return Err(invalid(
            "market",
            "initial_price",
            "must lie within [price_floor, price_ceiling]",
        ));
    }
    if !(config.max_step > 0.0) || !config.max_step.is_finite() {
        return Err(invalid("market", "max_step", "must be positive and finite"));
    }
    if config.history_capacity == 0 {
        return Err(invalid("market", "history_capacity", "must be positive"));
    }
    if config.chunk_size == 0 {
        return Err(invalid("chart", "chunk_size", "must be positive"));
    }
    if config.max_candles == 0 {
        return Err(invalid("chart", "max_candles", "must be positive"));
    }
    for (key, period) in [
        ("sma_period", config.sma_period),
        ("ema_period", config.ema_period),
        ("rsi_period", config.rsi_period),
    ] {
        if period == 0 {
            return Err(invalid("chart", key, "must be positive"));
        }
    }
    if config.expiry_ms == 0 {
        return Err(invalid("trading", "expiry_ms", "must be positive"));
    }
    if !(config.payout_rate > 0.0 && config.payout_rate <= 1.0) {
        return Err(invalid("trading", "payout_rate", "must be within (0, 1]"));
    }
    if !(config.initial_balance > 0.0) || !config.initial_balance.is_finite() {
        return Err(invalid(
            "trading",
            "initial_balance",
            "must be positive and finite",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_demo() {
        let c = EngineConfig::default();
        assert_eq!(c.tick_interval_ms, 1_000);
        assert_relative_eq!(c.initial_price, 50_000.0);
        assert_relative_eq!(c.price_floor, 45_000.0);
        assert_relative_eq!(c.price_ceiling, 55_000.0);
        assert_relative_eq!(c.max_step, 100.0);
        assert_eq!(c.history_capacity, 100);
        assert_eq!(c.chunk_size, 5);
        assert_eq!(c.max_candles, 20);
        assert_eq!((c.sma_period, c.ema_period, c.rsi_period), (10, 10, 14));
        assert_eq!(c.expiry_ms, 60_000);
        assert_relative_eq!(c.payout_rate, 0.85);
        assert_relative_eq!(c.initial_balance, 10_000.0);
    }

    #[test]
    fn defaults_validate() {
        assert!(validate_engine_config(&EngineConfig::default()).is_ok());
    }

    #[test]
    fn build_from_ini_overrides_and_defaults() {
        let content = "\
[market]
tick_interval_ms = 500
max_step = 250.0

[trading]
expiry_ms = 3000
payout_rate = 0.9
";
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        let config = build_engine_config(&adapter);

        assert_eq!(config.tick_interval_ms, 500);
        assert_relative_eq!(config.max_step, 250.0);
        assert_eq!(config.expiry_ms, 3000);
        assert_relative_eq!(config.payout_rate, 0.9);
        // Untouched keys fall back to defaults.
        assert_eq!(config.chunk_size, 5);
        assert_relative_eq!(config.initial_balance, 10_000.0);
    }

    #[test]
    fn inverted_band_rejected() {
        let config = EngineConfig {
            price_floor: 55_000.0,
            price_ceiling: 45_000.0,
            initial_price: 50_000.0,
            ..EngineConfig::default()
        };
        let err = validate_engine_config(&config).unwrap_err();
        assert!(err.to_string().contains("price_floor"));
    }

    #[test]
    fn initial_price_outside_band_rejected() {
        let config = EngineConfig {
            initial_price: 60_000.0,
            ..EngineConfig::default()
        };
        assert!(validate_engine_config(&config).is_err());
    }

    #[test]
    fn zero_periods_rejected() {
        for field in ["sma", "ema", "rsi"] {
            let mut config = EngineConfig::default();
            match field {
                "sma" => config.sma_period = 0,
                "ema" => config.ema_period = 0,
                _ => config.rsi_period = 0,
            }
            assert!(validate_engine_config(&config).is_err(), "{field} accepted 0");
        }
    }

    #[test]
    fn payout_rate_bounds() {
        for rate in [0.0, -0.5, 1.5] {
            let config = EngineConfig {
                payout_rate: rate,
                ..EngineConfig::default()
            };
            assert!(validate_engine_config(&config).is_err(), "rate {rate} accepted");
        }
        let config = EngineConfig {
            payout_rate: 1.0,
            ..EngineConfig::default()
        };
        assert!(validate_engine_config(&config).is_ok());
    }

    #[test]
    fn zero_chunk_and_candles_rejected() {
        let config = EngineConfig {
            chunk_size: 0,
            ..EngineConfig::default()
        };
        assert!(validate_engine_config(&config).is_err());

        let config = EngineConfig {
            max_candles: 0,
            ..EngineConfig::default()
        };
        assert!(validate_engine_config(&config).is_err());
    }
}
