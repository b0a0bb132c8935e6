//! Account ledger.
//!
//! Holds the balance; mutated only by trade settlement, by exactly the
//! settlement payout (negative on loss). Everything else gets a read-only
//! snapshot.

#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    balance: f64,
    initial_balance: f64,
}

impl Ledger {
    pub fn new(initial_balance: f64) -> Self {
        Ledger {
            balance: initial_balance,
            initial_balance,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn initial_balance(&self) -> f64 {
        self.initial_balance
    }

    /// Net profit/loss since construction.
    pub fn net(&self) -> f64 {
        self.balance - self.initial_balance
    }

    /// Apply a signed settlement payout.
    pub fn apply(&mut self, payout: f64) {
        self.balance += payout;
    }

    /// Whether a stake of `amount` is coverable right now.
    pub fn can_cover(&self, amount: f64) -> bool {
        amount <= self.balance
    }
}
