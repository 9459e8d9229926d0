//! Port definitions (hexagonal architecture)
//!
//! Ports define the seams between the engine and its collaborators. Accounts
//! and persons depend only on these traits, never on the logger or on a
//! concrete time source.

mod clock;
mod subscriber;

pub use clock::Clock;
pub use subscriber::{Notifier, Subscriber};
