//! Configuration management
//!
//! Optional `settings.json` in the ledger directory:
//! ```json
//! {
//!   "clock": { "start": 1048000000, "maxStep": 1000, "seed": 7 },
//!   "firstAccountNumber": 100000,
//!   "enforceVisaCreditLimit": false,
//!   "seedSampleData": true
//! }
//! ```
//! Every field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapters::clock::{DEFAULT_MAX_STEP, DEFAULT_START};
use crate::domain::result::{Error, Result};

pub const SETTINGS_FILE: &str = "settings.json";
pub const CLOCK_SEED_ENV: &str = "LEDGER_CLOCK_SEED";

/// Simulated clock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClockConfig {
    pub start: i64,
    pub max_step: i64,
    pub seed: Option<u64>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            max_step: DEFAULT_MAX_STEP,
            seed: None,
        }
    }
}

/// Ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub clock: ClockConfig,
    pub first_account_number: u32,
    /// Reject Visa purchases that breach the credit limit
    pub enforce_visa_credit_limit: bool,
    pub seed_sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock: ClockConfig::default(),
            first_account_number: 100_000,
            enforce_visa_credit_limit: false,
            seed_sample_data: true,
        }
    }
}

impl Config {
    /// Load config from the ledger directory
    ///
    /// A missing, unreadable or unparsable settings file yields the
    /// defaults. The clock seed can be overridden with `LEDGER_CLOCK_SEED`.
    pub fn load(ledger_dir: &Path) -> Result<Self> {
        let settings_path = ledger_dir.join(SETTINGS_FILE);

        let mut config: Config = match std::fs::read_to_string(&settings_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %settings_path.display(), error = %e, "Ignoring unparsable settings");
                Config::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                tracing::warn!(path = %settings_path.display(), error = %e, "Ignoring unreadable settings");
                Config::default()
            }
        };

        if let Ok(raw) = std::env::var(CLOCK_SEED_ENV) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::config(format!("{}={:?}: {}", CLOCK_SEED_ENV, raw, e)))?;
            config.clock.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Write the config, replacing any existing settings file
    pub fn save(&self, ledger_dir: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(ledger_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.clock.max_step < 1 {
            return Err(Error::config("clock.maxStep must be at least 1"));
        }
        if self.clock.start < 0 {
            return Err(Error::config("clock.start cannot be negative"));
        }
        Ok(())
    }
}
