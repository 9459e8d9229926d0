//! Integration tests for ledger-core
//!
//! These run whole scenarios against a seeded bank: logins, money movement,
//! rejections, statements, and what ends up in the event log.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::collections::HashSet;
use std::sync::Arc;

use tempfile::TempDir;

use ledger_core::adapters::seed::SEED_PERSONS;
use ledger_core::adapters::{ManualClock, RecordingSubscriber};
use ledger_core::config::{Config, CLOCK_SEED_ENV, SETTINGS_FILE};
use ledger_core::ports::Clock;
use ledger_core::services::{Bank, EventLogger, LogKind};
use ledger_core::{AccountKind, Error, LedgerContext, Notification};

// ============================================================================
// Test Helpers
// ============================================================================

/// Seeded bank on a deterministic clock
fn seeded_bank() -> (Bank, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    let logger = Arc::new(EventLogger::new(Arc::clone(&dyn_clock)));
    let bank = Bank::seeded(dyn_clock, logger).expect("seeding should succeed");
    (bank, clock)
}

/// Password for a seeded person (first three characters of the sin)
fn password_of(name: &str) -> &'static str {
    let (_, sin) = SEED_PERSONS
        .iter()
        .find(|(n, _)| *n == name)
        .expect("unknown seed person");
    &sin[..3]
}

fn login(bank: &mut Bank, name: &str) {
    bank.login(name, password_of(name)).expect("login should succeed");
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================================
// Seed Scenario
// ============================================================================

#[test]
fn test_seeded_visa_account() {
    let (bank, _) = seeded_bank();

    let account = bank.get_account("VS-100000").unwrap();

    assert_eq!(account.users(), &["Narendra", "Ilia", "Mehrdad"]);
    assert!(close(account.balance(), 0.0));
    assert_eq!(bank.get_all_transactions().len(), 0);
}

#[test]
fn test_seeded_numbers_follow_creation_order() {
    let (bank, _) = seeded_bank();

    let numbers: Vec<&str> = bank.accounts().map(|a| a.number()).collect();
    assert_eq!(
        numbers,
        vec![
            "VS-100000",
            "VS-100001",
            "SV-100002",
            "SV-100003",
            "CK-100004",
            "CK-100005",
            "VS-100006",
            "SV-100007",
        ]
    );
}

#[test]
fn test_numbers_stay_unique_after_seed() {
    let (mut bank, _) = seeded_bank();

    let opened = bank.open_account(AccountKind::checking(false), 10.0).unwrap();
    assert_eq!(opened, "CK-100008");

    let numbers: HashSet<String> = bank.accounts().map(|a| a.number().to_string()).collect();
    assert_eq!(numbers.len(), 9);
}

#[test]
fn test_seeded_persons_start_logged_out() {
    let (bank, _) = seeded_bank();
    assert_eq!(bank.persons().count(), SEED_PERSONS.len());
    assert!(bank.persons().all(|p| !p.is_authenticated()));
}

// ============================================================================
// Authentication Gate
// ============================================================================

#[test]
fn test_withdraw_requires_login() {
    let (mut bank, _) = seeded_bank();

    let err = bank.withdraw("CK-100004", "Yin", 100.0).unwrap_err();
    assert!(matches!(err, Error::UserNotLoggedIn(_)));
    assert!(close(bank.get_account("CK-100004").unwrap().balance(), 2000.0));

    login(&mut bank, "Yin");
    bank.withdraw("CK-100004", "Yin", 100.0).unwrap();
    assert!(close(bank.get_account("CK-100004").unwrap().balance(), 1900.0));

    bank.logout("Yin").unwrap();
    assert!(bank.withdraw("CK-100004", "Yin", 100.0).is_err());
}

#[test]
fn test_non_member_cannot_withdraw() {
    let (mut bank, _) = seeded_bank();
    login(&mut bank, "Narendra");

    let err = bank.withdraw("SV-100002", "Narendra", 1.0).unwrap_err();

    assert_eq!(err.code(), "NAME_NOT_ASSOCIATED_WITH_ACCOUNT");
    assert!(close(bank.get_account("SV-100002").unwrap().balance(), 5000.0));
}

#[test]
fn test_non_member_cannot_purchase() {
    let (mut bank, _) = seeded_bank();
    login(&mut bank, "Yin");

    let err = bank.do_purchase("VS-100001", "Yin", 20.0).unwrap_err();

    assert_eq!(err.code(), "NAME_NOT_ASSOCIATED_WITH_ACCOUNT");
    let account = bank.get_account("VS-100001").unwrap();
    assert!(close(account.balance(), 150.0));
    assert!(account.transactions().is_empty());

    let events = bank.logger().transaction_events();
    assert_eq!(events.len(), 1);
    assert!(!events[0].success);
    assert_eq!(events[0].account_number.as_deref(), Some("VS-100001"));
}

#[test]
fn test_wrong_password_logged_once() {
    let (mut bank, _) = seeded_bank();

    let err = bank.login("Patrick", "000").unwrap_err();
    assert!(matches!(err, Error::PasswordIncorrect(_)));
    assert!(!bank.get_person("Patrick").unwrap().is_authenticated());

    let logins = bank.logger().login_events();
    assert_eq!(logins.len(), 1);
    assert!(!logins[0].success);
    assert!(logins[0].line.starts_with("Patrick - Login Failed at "));
}

#[test]
fn test_unknown_keys() {
    let (mut bank, _) = seeded_bank();

    assert!(matches!(
        bank.login("Nobody", "123"),
        Err(Error::UserDoesNotExist(_))
    ));
    assert!(matches!(
        bank.deposit("CK-000000", "Yin", 1.0),
        Err(Error::AccountDoesNotExist(_))
    ));
    // Account is resolved before the person
    assert!(matches!(
        bank.deposit("CK-000000", "Nobody", 1.0),
        Err(Error::AccountDoesNotExist(_))
    ));
}

// ============================================================================
// Overdraft and Credit Rules
// ============================================================================

#[test]
fn test_overdraft_only_where_enabled() {
    let (mut bank, _) = seeded_bank();
    login(&mut bank, "Jake");

    // CK-100005 has overdraft
    bank.withdraw("CK-100005", "Jake", 2000.0).unwrap();
    assert!(close(bank.get_account("CK-100005").unwrap().balance(), -500.0));

    // SV-100002 does not
    let err = bank.withdraw("SV-100002", "Jake", 5000.5).unwrap_err();
    assert!(matches!(err, Error::NoOverdraft { .. }));
    assert!(close(bank.get_account("SV-100002").unwrap().balance(), 5000.0));
}

#[test]
fn test_visa_breach_is_logged_but_applied() {
    let (mut bank, _) = seeded_bank();
    login(&mut bank, "Vijay");

    // VS-100001: balance 150, limit -500; 150 + 100 > -500
    bank.do_purchase("VS-100001", "Vijay", 100.0).unwrap();

    assert!(close(bank.get_account("VS-100001").unwrap().balance(), 50.0));
    let txs = bank.logger().transaction_events();
    assert_eq!(txs.len(), 2);
    assert!(!txs[0].success);
    assert!(txs[1].success);
}

#[test]
fn test_visa_withdraw_is_not_supported() {
    let (mut bank, _) = seeded_bank();
    login(&mut bank, "Ilia");

    let err = bank.withdraw("VS-100006", "Ilia", 10.0).unwrap_err();
    assert_eq!(err.code(), "NOT_SUPPORTED");
    assert!(bank.logger().transaction_events().is_empty());
}

#[test]
fn test_enforced_credit_limit_from_settings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(SETTINGS_FILE),
        r#"{ "enforceVisaCreditLimit": true }"#,
    )
    .unwrap();

    let mut ctx = LedgerContext::new(dir.path()).unwrap();
    ctx.bank.login("Arben", "567").unwrap();

    let err = ctx.bank.do_purchase("VS-100001", "Arben", 100.0).unwrap_err();

    assert!(matches!(err, Error::CreditLimitHasBeenExceeded { .. }));
    assert!(close(ctx.bank.get_account("VS-100001").unwrap().balance(), 150.0));
    assert_eq!(ctx.logger.failures().len(), 1);
}

// ============================================================================
// Ledger Invariants
// ============================================================================

#[test]
fn test_lowest_balance_is_running_minimum() {
    let (mut bank, _) = seeded_bank();
    login(&mut bank, "Nicoletta");

    let number = "CK-100005";
    let mut minimum = bank.get_account(number).unwrap().balance();
    let steps = [(-700.0, false), (250.0, true), (-1900.0, false), (3000.0, true), (-10.0, false)];

    for (amount, is_deposit) in steps {
        if is_deposit {
            bank.deposit(number, "Nicoletta", amount).unwrap();
        } else {
            bank.withdraw(number, "Nicoletta", -amount).unwrap();
        }
        let account = bank.get_account(number).unwrap();
        minimum = minimum.min(account.balance());
        assert!(close(account.lowest_balance(), minimum));
    }
}

#[test]
fn test_all_transactions_in_account_order() {
    let (mut bank, clock) = seeded_bank();
    login(&mut bank, "Hao");

    bank.deposit("SV-100007", "Hao", 10.0).unwrap();
    clock.tick();
    bank.deposit("SV-100002", "Hao", 20.0).unwrap();
    clock.tick();
    bank.withdraw("SV-100002", "Hao", 5.0).unwrap();

    let all = bank.get_all_transactions();
    let summary: Vec<(&str, f64)> = all.iter().map(|t| (t.account_number(), t.amount())).collect();

    // SV-100002 was opened before SV-100007
    assert_eq!(
        summary,
        vec![("SV-100002", 20.0), ("SV-100002", -5.0), ("SV-100007", 10.0)]
    );
    assert!(all[0].time() < all[1].time());
}

#[test]
fn test_statements_clear_every_ledger() {
    let (mut bank, _) = seeded_bank();
    login(&mut bank, "Mehrdad");

    bank.deposit("CK-100004", "Mehrdad", 100.0).unwrap();
    bank.withdraw("CK-100004", "Mehrdad", 50.0).unwrap();
    bank.withdraw("CK-100004", "Mehrdad", 50.0).unwrap();
    bank.do_purchase("VS-100000", "Mehrdad", 25.0).unwrap();

    let statements = bank.prepare_monthly_statements();

    assert_eq!(statements.len(), 8);
    assert!(bank.get_all_transactions().is_empty());

    let checking = bank.get_account("CK-100004").unwrap();
    assert!(close(checking.balance(), 2000.0 + 2000.0 * 0.005 / 12.0 - 3.0 * 0.05));

    // Statement postings do not reach the event log
    assert_eq!(bank.logger().transaction_events().len(), 4);
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_extra_subscribers_see_events_in_order() {
    let (mut bank, _) = seeded_bank();
    let recorder = Arc::new(RecordingSubscriber::new());
    bank.get_account_mut("SV-100003").unwrap().subscribe(recorder.clone());
    login(&mut bank, "Mayy");

    assert!(bank.withdraw("SV-100003", "Mayy", 1.0).is_err());
    bank.deposit("SV-100003", "Mayy", 40.0).unwrap();

    let all = recorder.all();
    assert_eq!(all.len(), 3);
    assert!(matches!(&all[0], Notification::Transaction(e) if !e.success && e.amount < 0.0));
    assert!(matches!(&all[1], Notification::Posted(e) if close(e.amount, 40.0)));
    assert!(matches!(&all[2], Notification::Transaction(e) if e.success));
}

#[test]
fn test_log_replay_covers_both_outcomes() {
    let (mut bank, _) = seeded_bank();
    let _ = bank.login("Yin", "bad");
    login(&mut bank, "Yin");
    let _ = bank.withdraw("SV-100002", "Yin", 9999.0);
    bank.withdraw("SV-100002", "Yin", 1.0).unwrap();

    let logins = bank.logger().replay_logins();
    let txs = bank.logger().replay_transactions();

    assert_eq!(logins.len(), 3);
    assert!(logins[1].contains("Login Failed"));
    assert!(logins[2].contains("Login Successful"));
    assert_eq!(txs.len(), 3);
    assert!(txs[1].contains("Withdraw of 9999 Failed"));
    assert!(txs[2].contains("Withdraw of 1 Successful"));

    let kinds: Vec<LogKind> = bank.logger().entries().iter().map(|e| e.kind).collect();
    assert_eq!(kinds.iter().filter(|k| **k == LogKind::Login).count(), 2);
}

// ============================================================================
// Context and Configuration
// ============================================================================

#[test]
fn test_context_seed_env_makes_runs_reproducible() {
    let dir = TempDir::new().unwrap();
    std::env::set_var(CLOCK_SEED_ENV, "1234");

    let a = LedgerContext::new(dir.path()).unwrap();
    let b = LedgerContext::new(dir.path()).unwrap();
    std::env::remove_var(CLOCK_SEED_ENV);

    assert_eq!(a.config.clock.seed, Some(1234));
    for _ in 0..10 {
        assert_eq!(a.clock.tick(), b.clock.tick());
    }
}

#[test]
fn test_context_without_sample_data() {
    let config = Config {
        seed_sample_data: false,
        ..Config::default()
    };
    let ctx = LedgerContext::from_config(config).unwrap();

    assert_eq!(ctx.bank.accounts().count(), 0);
    assert_eq!(ctx.bank.persons().count(), 0);
}
