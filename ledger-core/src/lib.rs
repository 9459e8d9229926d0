//! Ledger Core - account and transaction engine
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Persons, accounts, transactions, notifications and errors
//! - **ports**: Traits at the seams (Clock, Subscriber)
//! - **adapters**: Concrete clocks, a recording subscriber, sample data
//! - **services**: The bank registry, the event logger, status summaries

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::SimulatedClock;
use config::Config;
use ports::Clock;
use services::{Bank, EventLogger};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{Account, AccountKind, Notification, Person, Statement, Timestamp, Transaction};
pub use services::{LogEntry, LogKind, StatusSummary};

/// Main context for ledger operations
///
/// Holds the configuration, the shared clock, the event logger and the
/// bank wired to both.
pub struct LedgerContext {
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub logger: Arc<EventLogger>,
    pub bank: Bank,
}

impl LedgerContext {
    /// Create a context from the settings in `ledger_dir`
    pub fn new(ledger_dir: &Path) -> Result<Self> {
        let config = Config::load(ledger_dir)?;
        Self::from_config(config)
    }

    /// Create a context from an already loaded config
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;

        let clock: Arc<dyn Clock> = match config.clock.seed {
            Some(seed) => Arc::new(SimulatedClock::seeded(
                config.clock.start,
                config.clock.max_step,
                seed,
            )),
            None => Arc::new(SimulatedClock::new(config.clock.start, config.clock.max_step)),
        };
        let logger = Arc::new(EventLogger::new(Arc::clone(&clock)));
        let bank = Bank::from_config(&config, Arc::clone(&clock), Arc::clone(&logger))?;

        Ok(Self {
            config,
            clock,
            logger,
            bank,
        })
    }
}
