//! Logs command - show the event log of the scripted session

use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;

use ledger_core::LogKind;

use super::{demo, get_context};
use crate::output;

pub fn run(failures: bool, json: bool) -> Result<()> {
    let mut ctx = get_context()?;
    demo::run_session(&mut ctx.bank);

    let entries = if failures {
        ctx.logger.failures()
    } else {
        ctx.logger.entries()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No log entries found.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Time", "Kind", "Person", "Account", "Amount", "Result"]);

    for entry in &entries {
        let kind = match entry.kind {
            LogKind::Login => "login",
            LogKind::Transaction => "transaction",
        };
        table.add_row(vec![
            Cell::new(entry.at),
            Cell::new(kind),
            Cell::new(&entry.person_name),
            Cell::new(entry.account_number.as_deref().unwrap_or("")),
            entry
                .amount
                .map(output::money_cell)
                .unwrap_or_else(|| Cell::new("")),
            output::outcome_cell(entry.success, if entry.success { "ok" } else { "failed" }),
        ]);
    }

    println!("{}", table);

    let failed = entries.iter().filter(|e| !e.success).count();
    if failed > 0 && !failures {
        println!();
        println!("{}", format!("{} failed attempt(s)", failed).red().bold());
    }

    Ok(())
}
