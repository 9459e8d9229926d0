//! Transaction domain model

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time::Timestamp;

/// One balance-affecting event on an account's ledger
///
/// Positive amounts are deposits and payments, negative amounts are
/// withdrawals and purchases. The originator is recorded by name; the
/// account does not own the person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: Uuid,
    account_number: String,
    amount: f64,
    originator: String,
    time: Timestamp,
}

impl Transaction {
    pub fn new(
        account_number: impl Into<String>,
        amount: f64,
        originator: impl Into<String>,
        time: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_number: account_number.into(),
            amount,
            originator: originator.into(),
            time,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn originator(&self) -> &str {
        &self.originator
    }

    pub fn time(&self) -> Timestamp {
        self.time
    }

    pub fn is_deposit(&self) -> bool {
        self.amount >= 0.0
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_deposit() { "Deposit" } else { "Withdraw" };
        write!(
            f,
            "{} of {} made by {} at {}.",
            kind,
            self.amount.abs(),
            self.originator,
            self.time
        )
    }
}
