//! Engine error types.
//!
//! Three families: configuration problems, synchronous trade rejections,
//! and lifecycle violations (operations against a torn-down engine).
//! Insufficient indicator history is not an error; series carry explicit
//! `None` markers instead.

/// Top-level error type for binopt.
#[derive(Debug, thiserror::Error)]
pub enum BinoptError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("trade rejected: amount must be positive, got {amount}")]
    InvalidAmount { amount: f64 },

    #[error("trade rejected: amount {amount} exceeds balance {balance}")]
    InsufficientBalance { amount: f64, balance: f64 },

    #[error("engine is shut down; no further trades accepted")]
    EngineTornDown,

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BinoptError> for std::process::ExitCode {
    fn from(err: &BinoptError) -> Self {
        let code: u8 = match err {
            BinoptError::Io(_) | BinoptError::Export { .. } => 1,
            BinoptError::ConfigParse { .. } | BinoptError::ConfigInvalid { .. } => 2,
            BinoptError::EngineTornDown => 3,
            BinoptError::InvalidAmount { .. } | BinoptError::InsufficientBalance { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
