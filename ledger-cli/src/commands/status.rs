//! Status command - show registry summary

use anyhow::Result;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.bank.status();

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Ledger Status".bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec!["Current time", &status.now]);
    table.add_row(vec!["Persons", &status.total_persons.to_string()]);
    table.add_row(vec!["Accounts", &status.total_accounts.to_string()]);
    table.add_row(vec!["Transactions", &status.total_transactions.to_string()]);
    table.add_row(vec!["Total balance", &output::money(status.total_balance)]);

    println!("{}", table);

    if !status.authenticated_persons.is_empty() {
        println!();
        println!("{}", "Logged In".bold());
        for name in &status.authenticated_persons {
            println!("  - {}", name);
        }
    }

    Ok(())
}
