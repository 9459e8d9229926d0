//! Bank service - the registry of persons and accounts
//!
//! Owns every person and account, hands out account numbers from a single
//! counter shared by all kinds, and subscribes the event logger to each new
//! entity. Lookups are by exact name or number.

use std::collections::HashMap;
use std::sync::Arc;

use crate::adapters::seed::{seed_accounts, SEED_MEMBERSHIPS, SEED_PERSONS};
use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::domain::{Account, AccountKind, Person, Statement, Timestamp, Transaction};
use crate::ports::Clock;
use crate::services::logging::EventLogger;

/// Registry of persons and accounts
///
/// Both collections keep insertion order for listing; the index maps give
/// exact-key lookup.
pub struct Bank {
    clock: Arc<dyn Clock>,
    logger: Arc<EventLogger>,
    persons: Vec<Person>,
    person_index: HashMap<String, usize>,
    accounts: Vec<Account>,
    account_index: HashMap<String, usize>,
    next_number: u64,
    enforce_visa_credit_limit: bool,
}

impl Bank {
    /// Create an empty bank
    pub fn new(
        clock: Arc<dyn Clock>,
        logger: Arc<EventLogger>,
        first_account_number: u32,
    ) -> Self {
        Self {
            clock,
            logger,
            persons: Vec::new(),
            person_index: HashMap::new(),
            accounts: Vec::new(),
            account_index: HashMap::new(),
            next_number: u64::from(first_account_number),
            enforce_visa_credit_limit: false,
        }
    }

    /// Create a bank with the sample persons and accounts
    pub fn seeded(clock: Arc<dyn Clock>, logger: Arc<EventLogger>) -> Result<Self> {
        let config = Config::default();
        Self::from_config(&config, clock, logger)
    }

    /// Create a bank as the config describes
    pub fn from_config(
        config: &Config,
        clock: Arc<dyn Clock>,
        logger: Arc<EventLogger>,
    ) -> Result<Self> {
        let mut bank = Self::new(clock, logger, config.first_account_number);
        bank.enforce_visa_credit_limit = config.enforce_visa_credit_limit;
        if config.seed_sample_data {
            bank.seed()?;
        }
        Ok(bank)
    }

    /// Add the sample persons, accounts and memberships
    pub fn seed(&mut self) -> Result<()> {
        for (name, sin) in SEED_PERSONS {
            self.add_person(*name, *sin)?;
        }

        let mut numbers = Vec::new();
        for (kind, balance) in seed_accounts() {
            numbers.push(self.open_account(kind, balance)?);
        }

        for (number, members) in numbers.iter().zip(SEED_MEMBERSHIPS) {
            for name in *members {
                self.add_user_to_account(number, name)?;
            }
        }

        tracing::info!(
            persons = self.persons.len(),
            accounts = self.accounts.len(),
            "Bank seeded"
        );
        Ok(())
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn logger(&self) -> &Arc<EventLogger> {
        &self.logger
    }

    /// Move the simulated clock forward
    pub fn advance_clock(&self) -> Timestamp {
        self.clock.tick()
    }

    // === Persons ===

    /// Register a person and subscribe the logger to their logins
    pub fn add_person(&mut self, name: impl Into<String>, sin: impl Into<String>) -> Result<&Person> {
        let name = name.into();
        if self.person_index.contains_key(&name) {
            return Err(Error::DuplicatePerson(name));
        }

        let mut person = Person::new(name.clone(), sin, Arc::clone(&self.clock));
        person.subscribe(self.logger.clone());

        let slot = self.persons.len();
        self.persons.push(person);
        self.person_index.insert(name, slot);
        tracing::debug!(person = %self.persons[slot].name(), "Person added");
        Ok(&self.persons[slot])
    }

    pub fn get_person(&self, name: &str) -> Result<&Person> {
        let slot = self.person_slot(name)?;
        Ok(&self.persons[slot])
    }

    pub fn get_person_mut(&mut self, name: &str) -> Result<&mut Person> {
        let slot = self.person_slot(name)?;
        Ok(&mut self.persons[slot])
    }

    /// Persons in the order they were added
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.iter()
    }

    fn person_slot(&self, name: &str) -> Result<usize> {
        self.person_index
            .get(name)
            .copied()
            .ok_or_else(|| Error::UserDoesNotExist(name.to_string()))
    }

    // === Accounts ===

    /// Number the next account of this kind would get
    pub fn next_account_number(&self, kind: AccountKind) -> String {
        format!("{}-{}", kind.code(), self.next_number)
    }

    /// Create and register an account, returning its number
    ///
    /// The bank-wide enforce setting only switches enforcement on; a Visa
    /// kind that already enforces its limit keeps doing so.
    pub fn open_account(&mut self, kind: AccountKind, opening_balance: f64) -> Result<String> {
        let enforce = self.enforce_visa_credit_limit || kind.enforces_credit_limit();
        let kind = kind.with_enforced_credit_limit(enforce);
        let number = self.next_account_number(kind);

        let account = Account::new(number.clone(), kind, opening_balance, Arc::clone(&self.clock));
        self.add_account(account)?;
        Ok(number)
    }

    /// Register an account built elsewhere and subscribe the logger to it
    ///
    /// The number counter is moved past the account's sequence, so later
    /// `open_account` calls never collide with it.
    pub fn add_account(&mut self, mut account: Account) -> Result<()> {
        if self.account_index.contains_key(account.number()) {
            return Err(Error::DuplicateAccount(account.number().to_string()));
        }

        if let Some(sequence) = sequence_of(account.number()) {
            if sequence >= self.next_number {
                self.next_number = sequence.checked_add(1).ok_or_else(|| {
                    Error::config(format!("account number sequence exhausted at {}", sequence))
                })?;
            }
        }

        account.subscribe(self.logger.clone());

        let number = account.number().to_string();
        tracing::debug!(account = %number, balance = account.balance(), "Account added");
        self.account_index.insert(number, self.accounts.len());
        self.accounts.push(account);
        Ok(())
    }

    pub fn get_account(&self, number: &str) -> Result<&Account> {
        let slot = self.account_slot(number)?;
        Ok(&self.accounts[slot])
    }

    pub fn get_account_mut(&mut self, number: &str) -> Result<&mut Account> {
        let slot = self.account_slot(number)?;
        Ok(&mut self.accounts[slot])
    }

    /// Accounts in the order they were opened
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    fn account_slot(&self, number: &str) -> Result<usize> {
        self.account_index
            .get(number)
            .copied()
            .ok_or_else(|| Error::AccountDoesNotExist(number.to_string()))
    }

    /// Link an existing person to an existing account
    pub fn add_user_to_account(&mut self, number: &str, name: &str) -> Result<()> {
        self.with_account(number, name, |account, person| {
            account.add_user(person);
            Ok(())
        })
    }

    /// Every account's current ledger, account by account
    pub fn get_all_transactions(&self) -> Vec<&Transaction> {
        self.accounts
            .iter()
            .flat_map(|a| a.transactions().iter())
            .collect()
    }

    // === Operations by name and number ===

    pub fn login(&mut self, name: &str, password: &str) -> Result<()> {
        self.get_person_mut(name)?.login(password)
    }

    pub fn logout(&mut self, name: &str) -> Result<()> {
        self.get_person_mut(name)?.logout();
        Ok(())
    }

    pub fn deposit(&mut self, number: &str, name: &str, amount: f64) -> Result<()> {
        self.with_account(number, name, |account, person| account.deposit(amount, person))
    }

    pub fn withdraw(&mut self, number: &str, name: &str, amount: f64) -> Result<()> {
        self.with_account(number, name, |account, person| account.withdraw(amount, person))
    }

    pub fn do_purchase(&mut self, number: &str, name: &str, amount: f64) -> Result<()> {
        self.with_account(number, name, |account, person| {
            account.do_purchase(amount, person)
        })
    }

    pub fn do_payment(&mut self, number: &str, name: &str, amount: f64) -> Result<()> {
        self.with_account(number, name, |account, person| {
            account.do_payment(amount, person)
        })
    }

    /// Run the monthly statement on every account
    pub fn prepare_monthly_statements(&mut self) -> Vec<Statement> {
        self.accounts
            .iter_mut()
            .map(|a| a.prepare_monthly_statement())
            .collect()
    }

    /// Resolve account then person and run `op` on them
    fn with_account<T>(
        &mut self,
        number: &str,
        name: &str,
        op: impl FnOnce(&mut Account, &Person) -> Result<T>,
    ) -> Result<T> {
        let account_slot = self.account_slot(number)?;
        let person_slot = self.person_slot(name)?;
        op(&mut self.accounts[account_slot], &self.persons[person_slot])
    }
}

/// Numeric suffix of an account number such as `CK-100004`
fn sequence_of(number: &str) -> Option<u64> {
    number
        .rsplit_once('-')
        .and_then(|(_, sequence)| sequence.parse().ok())
}
