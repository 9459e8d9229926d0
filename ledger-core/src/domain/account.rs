//! Account domain model
//!
//! One account type with a closed set of kinds. Checking and saving accounts
//! take deposits and withdrawals; Visa accounts take payments and purchases.
//! The kind decides the withdrawal rule and how the monthly statement is
//! computed.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::event::Notification;
use super::person::Person;
use super::result::{Error, Result};
use super::transaction::Transaction;
use crate::ports::{Clock, Notifier, Subscriber};

/// Checking: cost charged per ledger entry at statement time
pub const CHECKING_COST_PER_TRANSACTION: f64 = 0.05;
/// Checking: yearly interest rate paid on the lowest balance
pub const CHECKING_INTEREST_RATE: f64 = 0.005;
/// Saving: cost charged per ledger entry at statement time
pub const SAVING_COST_PER_TRANSACTION: f64 = 0.5;
/// Saving: yearly interest rate paid on the lowest balance
pub const SAVING_INTEREST_RATE: f64 = 0.015;
/// Visa: yearly interest rate charged on the lowest balance
pub const VISA_INTEREST_RATE: f64 = 0.1995;
/// Visa: credit limit when none is given
pub const VISA_DEFAULT_CREDIT_LIMIT: f64 = 1200.0;

/// The account kinds and their per-kind settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AccountKind {
    Checking {
        has_overdraft: bool,
    },
    Saving {
        has_overdraft: bool,
    },
    /// `credit_limit` may be negative, in which case it acts as a floor
    /// the balance is expected to stay at or below.
    Visa {
        credit_limit: f64,
        enforce_credit_limit: bool,
    },
}

impl AccountKind {
    pub fn checking(has_overdraft: bool) -> Self {
        Self::Checking { has_overdraft }
    }

    pub fn saving(has_overdraft: bool) -> Self {
        Self::Saving { has_overdraft }
    }

    /// Visa account whose limit breaches are reported but not blocked
    pub fn visa(credit_limit: f64) -> Self {
        Self::Visa {
            credit_limit,
            enforce_credit_limit: false,
        }
    }

    /// Same kind with credit-limit breaches rejected (Visa only)
    pub fn with_enforced_credit_limit(self, enforce: bool) -> Self {
        match self {
            Self::Visa { credit_limit, .. } => Self::Visa {
                credit_limit,
                enforce_credit_limit: enforce,
            },
            other => other,
        }
    }

    pub fn enforces_credit_limit(&self) -> bool {
        matches!(
            self,
            Self::Visa {
                enforce_credit_limit: true,
                ..
            }
        )
    }

    /// Two-letter prefix used in account numbers
    pub fn code(&self) -> &'static str {
        match self {
            Self::Checking { .. } => "CK",
            Self::Saving { .. } => "SV",
            Self::Visa { .. } => "VS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Checking { .. } => "Checking",
            Self::Saving { .. } => "Saving",
            Self::Visa { .. } => "Visa",
        }
    }
}

/// What a monthly statement folded into the balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub account_number: String,
    pub transaction_count: usize,
    pub service_charge: f64,
    /// Signed: positive is paid to the holder, negative is charged
    pub interest: f64,
    pub closing_balance: f64,
}

/// A balance holder with users and a monthly ledger
#[derive(Debug)]
pub struct Account {
    number: String,
    kind: AccountKind,
    balance: f64,
    lowest_balance: f64,
    users: Vec<String>,
    transactions: Vec<Transaction>,
    notifier: Notifier,
}

impl Account {
    /// Create an account; the opening balance is not a transaction
    pub fn new(
        number: impl Into<String>,
        kind: AccountKind,
        opening_balance: f64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            number: number.into(),
            kind,
            balance: opening_balance,
            lowest_balance: opening_balance,
            users: Vec::new(),
            transactions: Vec::new(),
            notifier: Notifier::new(clock),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn lowest_balance(&self) -> f64 {
        self.lowest_balance
    }

    /// Names of associated persons, in the order they were added
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Ledger since the last statement, oldest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Register for transaction notifications
    pub fn subscribe(&mut self, subscriber: Arc<dyn Subscriber>) {
        self.notifier.subscribe(subscriber);
    }

    /// Associate a person; duplicates are kept
    pub fn add_user(&mut self, person: &Person) {
        self.users.push(person.name().to_string());
    }

    pub fn is_user(&self, name: &str) -> bool {
        self.users.iter().any(|u| u == name)
    }

    /// Unvalidated deposit (checking and saving)
    pub fn deposit(&mut self, amount: f64, person: &Person) -> Result<()> {
        if let AccountKind::Visa { .. } = self.kind {
            return Err(Error::not_supported(format!(
                "deposit on {}; use a payment",
                self.number
            )));
        }

        self.post(amount, person.name());
        self.report(person.name(), amount, true);
        Ok(())
    }

    /// Withdraw after the user, login and overdraft checks
    pub fn withdraw(&mut self, amount: f64, person: &Person) -> Result<()> {
        let has_overdraft = match self.kind {
            AccountKind::Checking { has_overdraft } | AccountKind::Saving { has_overdraft } => {
                has_overdraft
            }
            AccountKind::Visa { .. } => {
                return Err(Error::not_supported(format!(
                    "withdrawal on {}",
                    self.number
                )));
            }
        };

        self.authorize(person, -amount)?;

        if amount > self.balance && !has_overdraft {
            self.reject(person.name(), -amount);
            return Err(Error::NoOverdraft {
                number: self.number.clone(),
                balance: self.balance,
                requested: amount,
            });
        }

        self.post(-amount, person.name());
        self.report(person.name(), -amount, true);
        Ok(())
    }

    /// Pay down a Visa balance; always accepted
    pub fn do_payment(&mut self, amount: f64, person: &Person) -> Result<()> {
        if !matches!(self.kind, AccountKind::Visa { .. }) {
            return Err(Error::not_supported(format!("payment on {}", self.number)));
        }

        self.post(amount, person.name());
        self.report(person.name(), amount, true);
        Ok(())
    }

    /// Charge a purchase to a Visa account
    ///
    /// A credit-limit breach raises a failure notification. Unless the
    /// account enforces its limit, the purchase then goes through anyway
    /// and a success notification follows.
    pub fn do_purchase(&mut self, amount: f64, person: &Person) -> Result<()> {
        let (credit_limit, enforce) = match self.kind {
            AccountKind::Visa {
                credit_limit,
                enforce_credit_limit,
            } => (credit_limit, enforce_credit_limit),
            _ => {
                return Err(Error::not_supported(format!("purchase on {}", self.number)));
            }
        };

        self.authorize(person, -amount)?;

        let attempted = self.balance + amount;
        if attempted > credit_limit {
            self.reject(person.name(), -amount);
            if enforce {
                return Err(Error::CreditLimitHasBeenExceeded {
                    number: self.number.clone(),
                    attempted,
                    limit: credit_limit,
                });
            }
            tracing::warn!(
                account = %self.number,
                attempted,
                limit = credit_limit,
                "Credit limit exceeded; purchase not blocked"
            );
        }

        self.post(-amount, person.name());
        self.report(person.name(), -amount, true);
        Ok(())
    }

    /// Fold interest and service charges into the balance, then clear the ledger
    ///
    /// The lowest balance carries over to the next month.
    pub fn prepare_monthly_statement(&mut self) -> Statement {
        let transaction_count = self.transactions.len();

        let (service_charge, interest) = match self.kind {
            AccountKind::Checking { .. } => (
                transaction_count as f64 * CHECKING_COST_PER_TRANSACTION,
                self.lowest_balance * CHECKING_INTEREST_RATE / 12.0,
            ),
            AccountKind::Saving { .. } => (
                transaction_count as f64 * SAVING_COST_PER_TRANSACTION,
                self.lowest_balance * SAVING_INTEREST_RATE / 12.0,
            ),
            AccountKind::Visa { .. } => (0.0, -(self.lowest_balance * VISA_INTEREST_RATE / 12.0)),
        };

        self.balance += interest - service_charge;
        self.transactions.clear();

        tracing::info!(
            account = %self.number,
            transaction_count,
            service_charge,
            interest,
            balance = self.balance,
            "Monthly statement prepared"
        );

        Statement {
            account_number: self.number.clone(),
            transaction_count,
            service_charge,
            interest,
            closing_balance: self.balance,
        }
    }

    /// Apply an amount to the balance and record it on the ledger
    fn post(&mut self, amount: f64, originator: &str) {
        self.balance += amount;
        if self.balance < self.lowest_balance {
            self.lowest_balance = self.balance;
        }

        let at = self.notifier.clock().peek();
        self.transactions
            .push(Transaction::new(&self.number, amount, originator, at));
        self.notifier
            .emit(Notification::posted(&self.number, amount, at));
    }

    /// Membership check, then login check; the first failure wins
    fn authorize(&self, person: &Person, amount: f64) -> Result<()> {
        if !self.is_user(person.name()) {
            self.reject(person.name(), amount);
            return Err(Error::NameNotAssociatedWithAccount {
                name: person.name().to_string(),
                number: self.number.clone(),
            });
        }

        if !person.is_authenticated() {
            self.reject(person.name(), amount);
            return Err(Error::UserNotLoggedIn(person.name().to_string()));
        }

        Ok(())
    }

    fn reject(&self, person_name: &str, amount: f64) {
        tracing::warn!(account = %self.number, person = person_name, amount, "Transaction rejected");
        self.report(person_name, amount, false);
    }

    fn report(&self, person_name: &str, amount: f64, success: bool) {
        let at = self.notifier.clock().peek();
        self.notifier.emit(Notification::transaction(
            &self.number,
            person_name,
            amount,
            success,
            at,
        ));
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account Number: {}", self.number)?;
        writeln!(f, "Users: {}", self.users.join(", "))?;
        writeln!(f, "Balance: {}", self.balance)?;
        write!(f, "Transactions:")?;
        for (i, tx) in self.transactions.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, tx)?;
        }
        Ok(())
    }
}
