//! CLI command implementations

pub mod accounts;
pub mod demo;
pub mod logs;
pub mod persons;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use ledger_core::LedgerContext;

/// Install the diagnostics subscriber; `RUST_LOG` overrides the default
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Get the ledger directory from environment or default
pub fn get_ledger_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LEDGER_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .map(|home| home.join(".ledger"))
            .unwrap_or_else(|| PathBuf::from(".ledger"))
    }
}

/// Build a fresh, seeded context from the ledger directory settings
pub fn get_context() -> Result<LedgerContext> {
    let ledger_dir = get_ledger_dir();
    tracing::debug!(dir = %ledger_dir.display(), "Loading ledger settings");
    LedgerContext::new(&ledger_dir)
        .with_context(|| format!("Failed to initialize ledger from {:?}", ledger_dir))
}
