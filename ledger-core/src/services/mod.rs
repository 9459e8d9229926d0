//! Service layer - registry and collaborators
//!
//! `Bank` owns the entities and drives operations on them. `EventLogger`
//! is the notification consumer it wires to every person and account.

pub mod bank;
pub mod logging;
mod status;

pub use bank::Bank;
pub use logging::{EventLogger, LogEntry, LogKind};
pub use status::{AccountSummary, PersonSummary, StatusSummary};
