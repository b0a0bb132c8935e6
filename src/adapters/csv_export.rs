//! CSV report writer.
//!
//! One-shot export of the run's candles and trade history for inspection in
//! a spreadsheet; not persistence (nothing reads these back).

use std::path::{Path, PathBuf};

use crate::domain::candle::Candle;
use crate::domain::error::BinoptError;
use crate::domain::trade::Trade;

pub struct CsvExport {
    dir: PathBuf,
}

impl CsvExport {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        CsvExport {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn export_err(e: csv::Error) -> BinoptError {
        BinoptError::Export {
            reason: e.to_string(),
        }
    }

    pub fn write_candles(&self, candles: &[Candle]) -> Result<PathBuf, BinoptError> {
        let path = self.dir.join("candles.csv");
        let mut writer = csv::Writer::from_path(&path).map_err(Self::export_err)?;

        writer
            .write_record(["timestamp_ms", "open", "high", "low", "close", "volume"])
            .map_err(Self::export_err)?;
        for c in candles {
            writer
                .write_record([
                    c.timestamp_ms.to_string(),
                    c.open.to_string(),
                    c.high.to_string(),
                    c.low.to_string(),
                    c.close.to_string(),
                    format!("{:.2}", c.volume),
                ])
                .map_err(Self::export_err)?;
        }
        writer.flush()?;
        Ok(path)
    }

    pub fn write_trades(&self, trades: &[Trade]) -> Result<PathBuf, BinoptError> {
        let path = self.dir.join("trades.csv");
        let mut writer = csv::Writer::from_path(&path).map_err(Self::export_err)?;

        writer
            .write_record([
                "id",
                "direction",
                "amount",
                "entry_time_ms",
                "entry_price",
                "status",
                "exit_price",
                "payout",
            ])
            .map_err(Self::export_err)?;
        for t in trades {
            writer
                .write_record([
                    t.id.to_string(),
                    t.direction.to_string(),
                    t.amount.to_string(),
                    t.entry_time_ms.to_string(),
                    t.entry_price.to_string(),
                    t.status.to_string(),
                    t.exit_price.map(|p| p.to_string()).unwrap_or_default(),
                    t.payout.map(|p| p.to_string()).unwrap_or_default(),
                ])
                .map_err(Self::export_err)?;
        }
        writer.flush()?;
        Ok(path)
    }
}
