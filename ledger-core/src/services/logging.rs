//! Logging service - in-memory event log fed by notifications
//!
//! Subscribes to persons and accounts and keeps one formatted line per
//! login attempt and per transaction attempt, successful or not. Raw ledger
//! postings are not logged.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{LoginEvent, Notification, Timestamp, TransactionEvent};
use crate::ports::{Clock, Subscriber};

/// Which stream an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Login,
    Transaction,
}

/// A recorded log line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub person_name: String,
    pub success: bool,
    /// Signed amount; transaction entries only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    pub line: String,
    /// Simulated time of the event
    pub at: Timestamp,
    /// Wall-clock time the entry was stored
    pub recorded_at: DateTime<Utc>,
}

fn outcome(success: bool) -> &'static str {
    if success {
        "Successful"
    } else {
        "Failed"
    }
}

impl LogEntry {
    fn from_login(event: &LoginEvent) -> Self {
        Self {
            kind: LogKind::Login,
            person_name: event.person_name.clone(),
            success: event.success,
            amount: None,
            account_number: None,
            line: format!(
                "{} - Login {} at {}",
                event.person_name,
                outcome(event.success),
                event.at
            ),
            at: event.at,
            recorded_at: Utc::now(),
        }
    }

    fn from_transaction(event: &TransactionEvent) -> Self {
        let operation = if event.amount >= 0.0 { "Deposit" } else { "Withdraw" };
        Self {
            kind: LogKind::Transaction,
            person_name: event.person_name.clone(),
            success: event.success,
            amount: Some(event.amount),
            account_number: Some(event.account_number.clone()),
            line: format!(
                "{} - {} of {} {} at {}",
                event.person_name,
                operation,
                event.amount.abs(),
                outcome(event.success),
                event.at
            ),
            at: event.at,
            recorded_at: Utc::now(),
        }
    }
}

/// Append-only store of login and transaction lines
pub struct EventLogger {
    clock: Arc<dyn Clock>,
    entries: Mutex<Vec<LogEntry>>,
}

impl EventLogger {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        // Entries are only ever appended, so a poisoned list is still usable
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, entry: LogEntry) {
        tracing::debug!(line = %entry.line, "Event logged");
        self.lock().push(entry);
    }

    /// All entries in arrival order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    pub fn login_events(&self) -> Vec<LogEntry> {
        self.of_kind(LogKind::Login)
    }

    pub fn transaction_events(&self) -> Vec<LogEntry> {
        self.of_kind(LogKind::Transaction)
    }

    fn of_kind(&self, kind: LogKind) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    /// Entries that record a rejected attempt
    pub fn failures(&self) -> Vec<LogEntry> {
        self.lock().iter().filter(|e| !e.success).cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Printable login log: a current-time header then numbered lines
    pub fn replay_logins(&self) -> Vec<String> {
        self.replay(LogKind::Login)
    }

    /// Printable transaction log: a current-time header then numbered lines
    pub fn replay_transactions(&self) -> Vec<String> {
        self.replay(LogKind::Transaction)
    }

    fn replay(&self, kind: LogKind) -> Vec<String> {
        let mut lines = vec![format!("Current Time: {}", self.clock.peek())];
        lines.extend(
            self.of_kind(kind)
                .iter()
                .enumerate()
                .map(|(i, e)| format!("{}. {}", i + 1, e.line)),
        );
        lines
    }
}

impl Subscriber for EventLogger {
    fn name(&self) -> &str {
        "event-logger"
    }

    fn notify(&self, notification: &Notification) {
        match notification {
            Notification::Login(event) => self.record(LogEntry::from_login(event)),
            Notification::Transaction(event) => self.record(LogEntry::from_transaction(event)),
            Notification::Posted(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ManualClock;

    fn logger() -> EventLogger {
        EventLogger::new(Arc::new(ManualClock::new(0, 60)))
    }

    #[test]
    fn test_login_lines() {
        let logger = logger();

        logger.notify(&Notification::login("Yin", true, Timestamp::new(0)));
        logger.notify(&Notification::login("Hao", false, Timestamp::new(0)));

        let logins = logger.login_events();
        assert_eq!(logins.len(), 2);
        assert_eq!(logins[0].line, "Yin - Login Successful at 0000-01-01 00:00");
        assert_eq!(logins[1].line, "Hao - Login Failed at 0000-01-01 00:00");
        assert!(logger.transaction_events().is_empty());
    }

    #[test]
    fn test_transaction_lines() {
        let logger = logger();

        logger.notify(&Notification::transaction(
            "CK-100004",
            "Mehrdad",
            -120.5,
            false,
            Timestamp::new(3600),
        ));
        logger.notify(&Notification::transaction(
            "CK-100004",
            "Mehrdad",
            40.0,
            true,
            Timestamp::new(3600),
        ));

        let txs = logger.transaction_events();
        assert_eq!(
            txs[0].line,
            "Mehrdad - Withdraw of 120.5 Failed at 0000-01-01 01:00"
        );
        assert_eq!(
            txs[1].line,
            "Mehrdad - Deposit of 40 Successful at 0000-01-01 01:00"
        );
        assert_eq!(logger.failures().len(), 1);
    }

    #[test]
    fn test_postings_are_ignored() {
        let logger = logger();
        logger.notify(&Notification::posted("SV-1", 10.0, Timestamp::new(0)));
        assert_eq!(logger.count(), 0);
    }

    #[test]
    fn test_replay_numbering() {
        let logger = logger();
        logger.notify(&Notification::login("A", true, Timestamp::new(0)));
        logger.notify(&Notification::login("B", true, Timestamp::new(0)));

        let lines = logger.replay_logins();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Current Time: 0000-01-01 00:00");
        assert!(lines[1].starts_with("1. A - Login"));
        assert!(lines[2].starts_with("2. B - Login"));
    }

    #[test]
    fn test_entries_serialize() {
        let logger = logger();
        logger.notify(&Notification::login("A", true, Timestamp::new(0)));

        let json = serde_json::to_value(logger.entries()).unwrap();
        assert_eq!(json[0]["kind"], "login");
        assert!(json[0].get("amount").is_none());
    }
}
