//! Core domain types and logic.

pub mod candle;
pub mod config;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod ledger;
pub mod price;
pub mod scheduler;
pub mod trade;
