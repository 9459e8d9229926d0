//! Demo command - scripted session against the seeded bank

use std::fmt;

use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;

use ledger_core::services::Bank;

use super::{accounts, get_context};
use crate::output;

/// One scripted action
enum Step {
    Login(&'static str, &'static str),
    Logout(&'static str),
    Deposit(&'static str, &'static str, f64),
    Withdraw(&'static str, &'static str, f64),
    Purchase(&'static str, &'static str, f64),
    Payment(&'static str, &'static str, f64),
}

impl Step {
    fn apply(&self, bank: &mut Bank) -> ledger_core::Result<()> {
        match *self {
            Step::Login(name, password) => bank.login(name, password),
            Step::Logout(name) => bank.logout(name),
            Step::Deposit(number, name, amount) => bank.deposit(number, name, amount),
            Step::Withdraw(number, name, amount) => bank.withdraw(number, name, amount),
            Step::Purchase(number, name, amount) => bank.do_purchase(number, name, amount),
            Step::Payment(number, name, amount) => bank.do_payment(number, name, amount),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Login(name, password) => write!(f, "{} logs in with {:?}", name, password),
            Step::Logout(name) => write!(f, "{} logs out", name),
            Step::Deposit(number, name, amount) => {
                write!(f, "{} deposits {} to {}", name, amount, number)
            }
            Step::Withdraw(number, name, amount) => {
                write!(f, "{} withdraws {} from {}", name, amount, number)
            }
            Step::Purchase(number, name, amount) => {
                write!(f, "{} buys {} on {}", name, amount, number)
            }
            Step::Payment(number, name, amount) => {
                write!(f, "{} pays {} to {}", name, amount, number)
            }
        }
    }
}

/// The session: every rejection kind shows up at least once
fn script() -> Vec<Step> {
    vec![
        Step::Login("Narendra", "123"),
        Step::Login("Ilia", "999"),
        Step::Login("Ilia", "234"),
        Step::Login("Yin", "789"),
        Step::Login("Jake", "901"),
        Step::Login("Vijay", "456"),
        Step::Login("Mayy", "122"),
        Step::Deposit("CK-100004", "Yin", 500.0),
        Step::Withdraw("CK-100004", "Yin", 200.0),
        Step::Withdraw("CK-100004", "Narendra", 50.0),
        Step::Withdraw("SV-100002", "Hao", 10.0),
        Step::Withdraw("SV-100003", "Mayy", 100.0),
        Step::Deposit("SV-100003", "Mayy", 250.0),
        Step::Withdraw("CK-100005", "Jake", 2000.0),
        Step::Purchase("VS-100000", "Narendra", 300.0),
        Step::Purchase("VS-100001", "Vijay", 100.0),
        Step::Payment("VS-100000", "Ilia", 150.0),
        Step::Withdraw("VS-100006", "Ilia", 10.0),
        Step::Logout("Yin"),
        Step::Withdraw("CK-100004", "Yin", 10.0),
        Step::Withdraw("CK-999999", "Yin", 10.0),
        Step::Login("Nobody", "000"),
    ]
}

/// Result of one scripted step
#[derive(Debug, Serialize)]
pub struct StepOutcome {
    pub step: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run the script, advancing the clock before each step
pub fn run_session(bank: &mut Bank) -> Vec<StepOutcome> {
    script()
        .into_iter()
        .map(|step| {
            bank.advance_clock();
            let result = step.apply(bank);
            StepOutcome {
                step: step.to_string(),
                ok: result.is_ok(),
                error: result.err().map(|e| e.to_string()),
            }
        })
        .collect()
}

pub fn run(json: bool) -> Result<()> {
    let mut ctx = get_context()?;
    let steps = run_session(&mut ctx.bank);

    if json {
        let before = ctx.bank.status();
        let transactions: Vec<_> = ctx.bank.get_all_transactions().into_iter().cloned().collect();
        let logs = ctx.logger.entries();
        let statements = ctx.bank.prepare_monthly_statements();
        let after = ctx.bank.status();

        let report = serde_json::json!({
            "steps": steps,
            "before_statements": before,
            "transactions": transactions,
            "logs": logs,
            "statements": statements,
            "after_statements": after,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::heading("Session");
    let mut table = output::create_table();
    table.set_header(vec!["#", "Step", "Result"]);
    for (i, outcome) in steps.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&outcome.step),
            output::outcome_cell(outcome.ok, outcome.error.as_deref().unwrap_or("ok")),
        ]);
    }
    println!("{}", table);

    output::heading("Accounts");
    for account in ctx.bank.accounts() {
        println!("{}", account);
        println!();
    }

    output::heading("All Transactions");
    for (i, tx) in ctx.bank.get_all_transactions().iter().enumerate() {
        println!("{}. {}", i + 1, tx);
    }

    output::heading("Login Events");
    for line in ctx.logger.replay_logins() {
        println!("{}", line);
    }

    output::heading("Transaction Events");
    for line in ctx.logger.replay_transactions() {
        println!("{}", line);
    }

    ctx.bank.advance_clock();
    let statements = ctx.bank.prepare_monthly_statements();

    output::heading("Monthly Statements");
    let mut table = output::create_table();
    table.set_header(vec!["Account", "Txns", "Service charge", "Interest", "Closing"]);
    for s in &statements {
        table.add_row(vec![
            Cell::new(&s.account_number),
            Cell::new(s.transaction_count),
            output::money_cell(-s.service_charge),
            output::money_cell(s.interest),
            output::money_cell(s.closing_balance),
        ]);
    }
    println!("{}", table);

    output::heading("Accounts After Statements");
    println!("{}", accounts::render(&ctx.bank));

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ledger_core::adapters::ManualClock;
    use ledger_core::ports::Clock;
    use ledger_core::services::EventLogger;

    use super::*;

    fn seeded() -> Bank {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::default());
        let logger = Arc::new(EventLogger::new(Arc::clone(&clock)));
        Bank::seeded(clock, logger).unwrap()
    }

    #[test]
    fn test_session_hits_every_rejection() {
        let mut bank = seeded();
        let steps = run_session(&mut bank);

        let errors: Vec<&str> = steps.iter().filter_map(|s| s.error.as_deref()).collect();
        for code in [
            "PASSWORD_INCORRECT",
            "NAME_NOT_ASSOCIATED_WITH_ACCOUNT",
            "USER_NOT_LOGGED_IN",
            "NO_OVERDRAFT",
            "NOT_SUPPORTED",
            "ACCOUNT_DOES_NOT_EXIST",
            "USER_DOES_NOT_EXIST",
        ] {
            assert!(errors.iter().any(|e| e.starts_with(code)), "missing {}", code);
        }
    }

    #[test]
    fn test_session_balances() {
        let mut bank = seeded();
        run_session(&mut bank);

        let balance = |n: &str| bank.get_account(n).unwrap().balance();
        assert!((balance("CK-100004") - 2300.0).abs() < 1e-9);
        assert!((balance("CK-100005") + 500.0).abs() < 1e-9);
        assert!((balance("VS-100000") + 150.0).abs() < 1e-9);
        assert!((balance("VS-100001") - 50.0).abs() < 1e-9);
        assert!((balance("SV-100003") - 250.0).abs() < 1e-9);
    }
}
