//! Status service - registry summaries

use serde::Serialize;

use crate::domain::Account;
use crate::services::bank::Bank;

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub now: String,
    pub total_persons: usize,
    pub total_accounts: usize,
    pub total_transactions: usize,
    pub total_balance: f64,
    pub authenticated_persons: Vec<String>,
    pub accounts: Vec<AccountSummary>,
}

#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub number: String,
    pub kind: String,
    pub users: Vec<String>,
    pub balance: f64,
    pub lowest_balance: f64,
    pub transaction_count: usize,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            number: account.number().to_string(),
            kind: account.kind().label().to_string(),
            users: account.users().to_vec(),
            balance: account.balance(),
            lowest_balance: account.lowest_balance(),
            transaction_count: account.transactions().len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersonSummary {
    pub name: String,
    pub authenticated: bool,
    /// Accounts the person is associated with
    pub accounts: Vec<String>,
}

impl Bank {
    /// Overall summary
    pub fn status(&self) -> StatusSummary {
        let accounts: Vec<AccountSummary> = self.accounts().map(AccountSummary::from).collect();

        StatusSummary {
            now: self.clock().peek().to_string(),
            total_persons: self.persons().count(),
            total_accounts: accounts.len(),
            total_transactions: self.get_all_transactions().len(),
            total_balance: accounts.iter().map(|a| a.balance).sum(),
            authenticated_persons: self
                .persons()
                .filter(|p| p.is_authenticated())
                .map(|p| p.name().to_string())
                .collect(),
            accounts,
        }
    }

    /// One row per person with their accounts
    pub fn person_summaries(&self) -> Vec<PersonSummary> {
        self.persons()
            .map(|p| PersonSummary {
                name: p.name().to_string(),
                authenticated: p.is_authenticated(),
                accounts: self
                    .accounts()
                    .filter(|a| a.is_user(p.name()))
                    .map(|a| a.number().to_string())
                    .collect(),
            })
            .collect()
    }
}
