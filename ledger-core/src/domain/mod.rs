//! Core domain entities
//!
//! Persons, accounts and their ledgers. Collaborators are reached only
//! through the traits in `ports`.

pub mod account;
pub mod event;
mod person;
pub mod result;
mod time;
mod transaction;

pub use account::{Account, AccountKind, Statement};
pub use event::{LoginEvent, Notification, PostedEvent, TransactionEvent};
pub use person::Person;
pub use time::Timestamp;
pub use transaction::Transaction;
