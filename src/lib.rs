//! binopt: binary-options demo trading engine.
//!
//! Hexagonal architecture: engine logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`]. The UI layers the
//! engine was built for (charts, toasts, profile views) sit outside this
//! crate and consume read-only snapshots and settlement events.

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
