//! The owning engine state object.
//!
//! `TradingEngine` owns the scheduler, price history, candles, trades and
//! ledger, and is the single mutation path for all of them. Collaborators
//! receive read-only snapshots and settlement events; nothing outside this
//! type touches engine state. Single-threaded and cooperative: work only
//! happens inside [`TradingEngine::advance`], which drains the scheduler up
//! to a deadline, so ticks and settlements are totally ordered and a
//! settlement always reads the price as of the moment its timer fires.

use std::collections::HashMap;

use crate::domain::candle::{Candle, aggregate_candles};
use crate::domain::config::EngineConfig;
use crate::domain::error::BinoptError;
use crate::domain::indicator::{self, IndicatorKind, IndicatorSeries};
use crate::domain::ledger::Ledger;
use crate::domain::price::{PriceHistory, PricePoint, next_price};
use crate::domain::scheduler::{Scheduler, TaskId};
use crate::domain::trade::{
    Direction, SettlementEvent, Trade, TradeStatus, settle_outcome, settlement_payout,
};
use crate::ports::event_port::EventSink;
use crate::ports::random_port::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Tick,
    Settle(u64),
}

pub struct TradingEngine {
    config: EngineConfig,
    rng: Box<dyn RandomSource>,
    scheduler: Scheduler<Task>,
    history: PriceHistory,
    candles: Vec<Candle>,
    trades: Vec<Trade>,
    settlement_timers: HashMap<u64, TaskId>,
    ledger: Ledger,
    sinks: Vec<Box<dyn EventSink>>,
    next_trade_id: u64,
    torn_down: bool,
}

impl TradingEngine {
    pub fn new(config: EngineConfig, rng: Box<dyn RandomSource>) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(config.tick_interval_ms, Task::Tick);

        TradingEngine {
            history: PriceHistory::new(config.history_capacity),
            ledger: Ledger::new(config.initial_balance),
            config,
            rng,
            scheduler,
            candles: Vec::new(),
            trades: Vec::new(),
            settlement_timers: HashMap::new(),
            sinks: Vec::new(),
            next_trade_id: 1,
            torn_down: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Engine-local time, in milliseconds since construction.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Advance virtual time by `delta_ms`, firing every due tick and
    /// settlement in order. A torn-down engine does nothing.
    pub fn advance(&mut self, delta_ms: u64) {
        if self.torn_down {
            return;
        }
        let deadline = self.scheduler.now_ms() + delta_ms;
        while let Some(fired) = self.scheduler.pop_due(deadline) {
            match fired.task {
                Task::Tick => self.handle_tick(fired.due_ms),
                Task::Settle(trade_id) => self.handle_settlement(trade_id),
            }
        }
    }

    /// Open a binary-option trade against the current price. Rejected
    /// synchronously when the amount is non-positive or exceeds the balance;
    /// a torn-down engine rejects everything.
    pub fn open_trade(&mut self, amount: f64, direction: Direction) -> Result<Trade, BinoptError> {
        if self.torn_down {
            return Err(BinoptError::EngineTornDown);
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(BinoptError::InvalidAmount { amount });
        }
        if !self.ledger.can_cover(amount) {
            return Err(BinoptError::InsufficientBalance {
                amount,
                balance: self.ledger.balance(),
            });
        }

        let id = self.next_trade_id;
        self.next_trade_id += 1;

        let trade = Trade {
            id,
            amount,
            direction,
            entry_price: self.current_price(),
            entry_time_ms: self.scheduler.now_ms(),
            expiry_ms: self.config.expiry_ms,
            status: TradeStatus::Pending,
            exit_price: None,
            payout: None,
        };

        let timer = self
            .scheduler
            .schedule_after(self.config.expiry_ms, Task::Settle(id));
        self.settlement_timers.insert(id, timer);
        self.trades.push(trade.clone());
        Ok(trade)
    }

    /// Cancel all timers and refuse further work. Pending trades are left
    /// Pending forever; they can no longer settle or touch the ledger.
    pub fn shutdown(&mut self) {
        self.scheduler.clear();
        self.settlement_timers.clear();
        self.torn_down = true;
    }

    pub fn is_shut_down(&self) -> bool {
        self.torn_down
    }

    pub fn current_price(&self) -> f64 {
        self.history
            .last()
            .map(|p| p.value)
            .unwrap_or(self.config.initial_price)
    }

    /// Read-only snapshot of the retained price values, oldest first.
    pub fn price_history(&self) -> Vec<f64> {
        self.history.values()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Compute an indicator series over the current history snapshot.
    pub fn indicator(&self, kind: IndicatorKind) -> IndicatorSeries {
        indicator::calculate(kind, &self.history.values())
    }

    /// Trade snapshots, most recent first.
    pub fn trades(&self) -> Vec<Trade> {
        self.trades.iter().rev().cloned().collect()
    }

    pub fn trade(&self, id: u64) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    pub fn balance(&self) -> f64 {
        self.ledger.balance()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn handle_tick(&mut self, due_ms: u64) {
        let value = next_price(
            self.current_price(),
            self.config.max_step,
            self.config.price_floor,
            self.config.price_ceiling,
            self.rng.as_mut(),
        );
        self.history.push(PricePoint {
            timestamp_ms: due_ms,
            value,
        });

        // Derived views are recomputed wholesale from the bounded history.
        let points: Vec<PricePoint> = self.history.points().copied().collect();
        self.candles = aggregate_candles(
            &points,
            self.config.chunk_size,
            self.config.max_candles,
            self.rng.as_mut(),
        );

        self.scheduler
            .schedule_at(due_ms + self.config.tick_interval_ms, Task::Tick);
    }

    fn handle_settlement(&mut self, trade_id: u64) {
        let exit_price = self.current_price();
        let payout_rate = self.config.payout_rate;

        let Some(trade) = self.trades.iter_mut().find(|t| t.id == trade_id) else {
            return;
        };
        if trade.status.is_terminal() {
            // Duplicate delivery must observe the terminal state and no-op.
            return;
        }

        let status = settle_outcome(trade.direction, trade.entry_price, exit_price);
        let payout = settlement_payout(status, trade.amount, payout_rate);
        trade.status = status;
        trade.exit_price = Some(exit_price);
        trade.payout = Some(payout);

        self.settlement_timers.remove(&trade_id);
        self.ledger.apply(payout);

        let event = SettlementEvent {
            trade_id,
            status,
            payout,
        };
        for sink in &mut self.sinks {
            sink.settled(&event);
        }
    }
}
