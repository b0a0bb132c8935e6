//! Console settlement notifier.
//!
//! Stderr stand-in for the UI toast layer: one line per settlement event.

use crate::domain::trade::{SettlementEvent, TradeStatus};
use crate::ports::event_port::EventSink;

#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        ConsoleNotifier
    }

    fn format_line(event: &SettlementEvent) -> String {
        let sign = if event.payout >= 0.0 { "+" } else { "-" };
        format!(
            "trade #{} {}: {}${:.2}",
            event.trade_id,
            event.status,
            sign,
            event.payout.abs()
        )
    }
}

impl EventSink for ConsoleNotifier {
    fn settled(&mut self, event: &SettlementEvent) {
        eprintln!("{}", Self::format_line(event));
    }
}
