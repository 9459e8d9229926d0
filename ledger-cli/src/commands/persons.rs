//! Persons command - list persons and login state

use anyhow::Result;
use comfy_table::Cell;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let rows = ctx.bank.person_summaries();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Name", "Logged in", "Accounts"]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.name),
            output::outcome_cell(row.authenticated, if row.authenticated { "yes" } else { "no" }),
            Cell::new(row.accounts.join(", ")),
        ]);
    }

    println!("{}", table);
    Ok(())
}
