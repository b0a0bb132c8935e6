//! Port traits: seams between the engine and its collaborators.

pub mod config_port;
pub mod event_port;
pub mod random_port;
