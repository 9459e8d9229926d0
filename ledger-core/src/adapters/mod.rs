//! Adapter implementations
//!
//! Concrete implementations of the port traits plus the fixed seed data
//! the registry starts from.

pub mod clock;
pub mod recording;
pub mod seed;

pub use clock::{ManualClock, SimulatedClock};
pub use recording::RecordingSubscriber;
