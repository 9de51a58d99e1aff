use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::ledger;
use crate::models::Transaction;
use crate::settings::{db_path, load_settings};

pub(crate) fn render_register(transactions: &[Transaction], symbol: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Amount", "Remark", "Balance"]);
    for t in transactions {
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(t.date),
            Cell::new(money(t.amount, symbol)),
            Cell::new(&t.remark),
            Cell::new(money(t.running_total, symbol)),
        ]);
    }
    table
}

pub fn run() -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&db_path())?;

    let mut transactions = ledger::get_all(&conn)?;
    if transactions.is_empty() {
        println!("No transactions available.");
        return Ok(());
    }
    // Newest first for display; running totals stay chronological
    transactions.reverse();

    let symbol = &settings.currency_symbol;
    println!("Transaction History\n{}", render_register(&transactions, symbol));

    let balance = ledger::current_balance(&conn)?;
    let rendered = money(balance, symbol);
    let colored_balance = if balance < 0.0 {
        rendered.red().bold()
    } else {
        rendered.green().bold()
    };
    println!("\nCurrent balance: {colored_balance}");
    Ok(())
}
