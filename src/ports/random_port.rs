//! Randomness port.
//!
//! The price walk and the candle volume placeholder draw from this seam, so
//! production can use a real (optionally seeded) generator while tests inject
//! fixed sequences and assert exact outputs.

pub trait RandomSource {
    /// Uniform fraction in `[0, 1)`.
    fn next_fraction(&mut self) -> f64;
}
