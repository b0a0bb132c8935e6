//! Binary-option trades and settlement outcomes.
//!
//! A trade transitions exactly once, Pending → Won or Lost, when its expiry
//! timer fires; terminal states are immutable. A Call wins on a strict rise
//! above the entry price, a Put on a strict fall; a tie settles as Lost.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Call,
    Put,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeStatus {
    Pending,
    Won,
    Lost,
}

impl TradeStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TradeStatus::Won | TradeStatus::Lost)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub id: u64,
    pub amount: f64,
    pub direction: Direction,
    pub entry_price: f64,
    pub entry_time_ms: u64,
    pub expiry_ms: u64,
    pub status: TradeStatus,
    pub exit_price: Option<f64>,
    pub payout: Option<f64>,
}

impl Trade {
    /// Scheduled settlement instant.
    pub fn settles_at_ms(&self) -> u64 {
        self.entry_time_ms + self.expiry_ms
    }
}

/// Win/loss rule for a settling trade. Strict inequalities: an exit price
/// equal to the entry price loses in either direction.
pub fn settle_outcome(direction: Direction, entry_price: f64, exit_price: f64) -> TradeStatus {
    let won = match direction {
        Direction::Call => exit_price > entry_price,
        Direction::Put => exit_price < entry_price,
    };
    if won { TradeStatus::Won } else { TradeStatus::Lost }
}

/// Signed ledger delta for a resolved trade: `amount * payout_rate` on a win,
/// the full stake forfeited on a loss.
pub fn settlement_payout(status: TradeStatus, amount: f64, payout_rate: f64) -> f64 {
    match status {
        TradeStatus::Won => amount * payout_rate,
        TradeStatus::Lost => -amount,
        TradeStatus::Pending => 0.0,
    }
}

/// Emitted exactly once per trade resolution; the notification layer
/// subscribes to these.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementEvent {
    pub trade_id: u64,
    pub status: TradeStatus,
    pub payout: f64,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Call => write!(f, "CALL"),
            Direction::Put => write!(f, "PUT"),
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Pending => write!(f, "PENDING"),
            TradeStatus::Won => write!(f, "WON"),
            TradeStatus::Lost => write!(f, "LOST"),
        }
    }
}
