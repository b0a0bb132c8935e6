//! Settlement event port.
//!
//! The engine emits one [`SettlementEvent`](crate::domain::trade::SettlementEvent)
//! per trade resolution; notification-style consumers subscribe through this
//! trait.

use crate::domain::trade::SettlementEvent;

pub trait EventSink {
    fn settled(&mut self, event: &SettlementEvent);
}
