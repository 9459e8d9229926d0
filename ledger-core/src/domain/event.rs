//! Notifications raised by persons and accounts

use serde::{Deserialize, Serialize};

use super::time::Timestamp;

/// A login attempt, successful or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginEvent {
    pub person_name: String,
    pub success: bool,
    pub at: Timestamp,
}

/// A validated money movement attempt
///
/// `amount` is signed: negative for withdrawals and purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEvent {
    pub account_number: String,
    pub person_name: String,
    pub amount: f64,
    pub success: bool,
    pub at: Timestamp,
}

/// A raw ledger posting, raised on every balance change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedEvent {
    pub account_number: String,
    pub amount: f64,
    pub at: Timestamp,
}

/// Everything a subscriber can be told about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    Login(LoginEvent),
    Transaction(TransactionEvent),
    Posted(PostedEvent),
}

impl Notification {
    pub fn login(person_name: impl Into<String>, success: bool, at: Timestamp) -> Self {
        Self::Login(LoginEvent {
            person_name: person_name.into(),
            success,
            at,
        })
    }

    pub fn transaction(
        account_number: impl Into<String>,
        person_name: impl Into<String>,
        amount: f64,
        success: bool,
        at: Timestamp,
    ) -> Self {
        Self::Transaction(TransactionEvent {
            account_number: account_number.into(),
            person_name: person_name.into(),
            amount,
            success,
            at,
        })
    }

    pub fn posted(account_number: impl Into<String>, amount: f64, at: Timestamp) -> Self {
        Self::Posted(PostedEvent {
            account_number: account_number.into(),
            amount,
            at,
        })
    }

    /// Simulated time the notification was raised
    pub fn at(&self) -> Timestamp {
        match self {
            Notification::Login(e) => e.at,
            Notification::Transaction(e) => e.at,
            Notification::Posted(e) => e.at,
        }
    }
}
