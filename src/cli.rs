//! CLI definition and dispatch.

use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::console_notifier::ConsoleNotifier;
use crate::adapters::csv_export::CsvExport;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::rand_adapter::RngAdapter;
use crate::domain::config::{EngineConfig, build_engine_config, validate_engine_config};
use crate::domain::engine::TradingEngine;
use crate::domain::error::BinoptError;
use crate::domain::indicator::IndicatorKind;
use crate::domain::trade::Direction;
use crate::ports::random_port::RandomSource;

#[derive(Parser, Debug)]
#[command(name = "binopt", about = "Binary options demo trading engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a scripted demo session on the virtual clock
    Simulate {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of price ticks to simulate
        #[arg(short, long, default_value_t = 100)]
        ticks: u64,
        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
        /// Stake per demo trade
        #[arg(short, long, default_value_t = 100.0)]
        amount: f64,
        /// Directory to export candles.csv and trades.csv into
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
    /// Validate an engine configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            ticks,
            seed,
            amount,
            export,
        } => run_simulate(config.as_ref(), ticks, seed, amount, export.as_ref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = BinoptError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn resolve_config(path: Option<&PathBuf>) -> Result<EngineConfig, ExitCode> {
    let config = match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            let adapter = load_config(p)?;
            build_engine_config(&adapter)
        }
        None => EngineConfig::default(),
    };

    if let Err(e) = validate_engine_config(&config) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }
    Ok(config)
}

fn run_simulate(
    config_path: Option<&PathBuf>,
    ticks: u64,
    seed: Option<u64>,
    amount: f64,
    export_dir: Option<&PathBuf>,
) -> ExitCode {
    let config = match resolve_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let rng: Box<dyn RandomSource> = match seed {
        Some(s) => {
            eprintln!("Using seed {s}");
            Box::new(RngAdapter::seeded(s))
        }
        None => Box::new(RngAdapter::new()),
    };

    let interval = config.tick_interval_ms;
    let sma_period = config.sma_period;
    let ema_period = config.ema_period;
    let rsi_period = config.rsi_period;

    let mut engine = TradingEngine::new(config, rng);
    engine.subscribe(Box::new(ConsoleNotifier::new()));

    eprintln!(
        "Simulation started at {} ({} ticks of {}ms)",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        ticks,
        interval,
    );

    // Scripted session: warm up, then one trade each way.
    let warmup = ticks.min(5);
    engine.advance(warmup * interval);

    for direction in [Direction::Call, Direction::Put] {
        match engine.open_trade(amount, direction) {
            Ok(trade) => eprintln!(
                "Opened trade #{} {} ${:.2} at {:.2}",
                trade.id, trade.direction, trade.amount, trade.entry_price
            ),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
        engine.advance(interval);
    }

    let elapsed_ticks = warmup + 2;
    if ticks > elapsed_ticks {
        engine.advance((ticks - elapsed_ticks) * interval);
    }

    print_summary(&engine, sma_period, ema_period, rsi_period);

    if let Some(dir) = export_dir {
        let export = CsvExport::new(dir);
        let written = export
            .write_candles(engine.candles())
            .and_then(|_| export.write_trades(&engine.trades()));
        match written {
            Ok(_) => eprintln!("\nExported CSV reports to {}", dir.display()),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    engine.shutdown();
    ExitCode::SUCCESS
}

fn print_summary(engine: &TradingEngine, sma: usize, ema: usize, rsi: usize) {
    eprintln!("\n=== Session Summary ===");
    eprintln!("Elapsed:       {}s", engine.now_ms() / 1000);
    eprintln!("Final Price:   {:.2}", engine.current_price());
    eprintln!("Candles:       {}", engine.candles().len());

    for kind in [
        IndicatorKind::Sma(sma),
        IndicatorKind::Ema(ema),
        IndicatorKind::Rsi(rsi),
    ] {
        let series = engine.indicator(kind);
        match series.values.iter().rev().flatten().next() {
            Some(value) => eprintln!("{}:       {:.2}", kind, value),
            None => eprintln!("{}:       warming up", kind),
        }
    }

    let trades = engine.trades();
    if !trades.is_empty() {
        eprintln!("\n=== Trades ===");
        for t in &trades {
            let outcome = match t.payout {
                Some(p) if p >= 0.0 => format!("{} +${:.2}", t.status, p),
                Some(p) => format!("{} -${:.2}", t.status, p.abs()),
                None => t.status.to_string(),
            };
            eprintln!(
                "  #{} {} ${:.2} at {:.2} ({}s): {}",
                t.id,
                t.direction,
                t.amount,
                t.entry_price,
                t.entry_time_ms / 1000,
                outcome,
            );
        }
    }

    let ledger = engine.ledger();
    let net_sign = if ledger.net() >= 0.0 { "+" } else { "-" };
    eprintln!("\nBalance:       ${:.2}", ledger.balance());
    eprintln!("Net:           {}${:.2}", net_sign, ledger.net().abs());
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let config = build_engine_config(&adapter);
    match validate_engine_config(&config) {
        Ok(()) => {
            eprintln!("Configuration is valid.");
            eprintln!(
                "  market:  tick {}ms, price {:.0} in [{:.0}, {:.0}], step {:.0}",
                config.tick_interval_ms,
                config.initial_price,
                config.price_floor,
                config.price_ceiling,
                config.max_step,
            );
            eprintln!(
                "  chart:   chunk {}, max {} candles, SMA {}, EMA {}, RSI {}",
                config.chunk_size,
                config.max_candles,
                config.sma_period,
                config.ema_period,
                config.rsi_period,
            );
            eprintln!(
                "  trading: expiry {}ms, payout {:.2}, balance ${:.2}",
                config.expiry_ms, config.payout_rate, config.initial_balance,
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves_without_file() {
        let config = resolve_config(None).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn cli_parses_simulate_flags() {
        let cli = Cli::try_parse_from([
            "binopt", "simulate", "--ticks", "50", "--seed", "7", "--amount", "250",
        ])
        .unwrap();
        match cli.command {
            Command::Simulate {
                ticks,
                seed,
                amount,
                config,
                export,
            } => {
                assert_eq!(ticks, 50);
                assert_eq!(seed, Some(7));
                assert_eq!(amount, 250.0);
                assert!(config.is_none());
                assert!(export.is_none());
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn cli_requires_validate_config() {
        assert!(Cli::try_parse_from(["binopt", "validate"]).is_err());
    }
}
