//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a section heading
pub fn heading(msg: &str) {
    println!();
    println!("{}", msg.bold());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format an amount with two decimals
pub fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Amount cell, red when negative
pub fn money_cell(amount: f64) -> Cell {
    let cell = Cell::new(money(amount));
    if amount < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

/// Success/failure cell
pub fn outcome_cell(ok: bool, text: &str) -> Cell {
    Cell::new(text).fg(if ok { Color::Green } else { Color::Red })
}
