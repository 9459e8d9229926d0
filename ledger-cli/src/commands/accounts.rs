//! Accounts command - list accounts and balances

use anyhow::Result;
use comfy_table::Cell;

use super::get_context;
use crate::output;

pub fn run(verbose: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ctx.bank.status().accounts)?);
        return Ok(());
    }

    if verbose {
        for account in ctx.bank.accounts() {
            println!("{}", account);
            println!();
        }
        return Ok(());
    }

    println!("{}", render(&ctx.bank));
    Ok(())
}

/// Account table shared with the demo command
pub fn render(bank: &ledger_core::services::Bank) -> comfy_table::Table {
    let mut table = output::create_table();
    table.set_header(vec!["Number", "Kind", "Users", "Balance", "Lowest", "Txns"]);

    for summary in bank.status().accounts {
        table.add_row(vec![
            Cell::new(&summary.number),
            Cell::new(&summary.kind),
            Cell::new(summary.users.join(", ")),
            output::money_cell(summary.balance),
            output::money_cell(summary.lowest_balance),
            Cell::new(summary.transaction_count),
        ]);
    }

    table
}
