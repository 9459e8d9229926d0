//! Clock port - simulated time source

use crate::domain::Timestamp;

/// Source of simulated timestamps
///
/// `tick` advances the clock and returns the new time. `peek` reads it
/// without moving it. Readings never go backwards.
pub trait Clock: Send + Sync {
    /// Advance and return the new time
    fn tick(&self) -> Timestamp;

    /// Current time, unchanged
    fn peek(&self) -> Timestamp;
}
