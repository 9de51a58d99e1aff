use comfy_table::{Cell, Table};

use crate::cli::list::render_register;
use crate::cli::parse_date;
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::ledger;
use crate::reports::{self, Analysis};
use crate::settings::{db_path, load_settings};

fn render_analysis(analysis: &Analysis, symbol: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total Rent"),
        Cell::new(money(analysis.total_rent, symbol)),
    ]);
    table.add_row(vec![
        Cell::new("Total Light Bills"),
        Cell::new(money(analysis.total_light_bills, symbol)),
    ]);
    table.add_row(vec![
        Cell::new("Total Payments Made"),
        Cell::new(money(analysis.total_payments, symbol)),
    ]);
    table.add_row(vec![
        Cell::new("Average Monthly Rent"),
        Cell::new(money(analysis.avg_monthly_rent, symbol)),
    ]);
    table.add_row(vec![
        Cell::new("Average Light Bill"),
        Cell::new(money(analysis.avg_light_bill, symbol)),
    ]);
    table.add_row(vec![
        Cell::new("Number of Payments"),
        Cell::new(analysis.num_payments),
    ]);
    table.add_row(vec![
        Cell::new("Current Balance"),
        Cell::new(money(analysis.current_balance, symbol)),
    ]);
    table
}

pub fn range(from: &str, to: &str) -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&db_path())?;
    let start = parse_date(from)?;
    let end = parse_date(to)?;

    let transactions = reports::generate_report(&conn, start, end)?;
    if transactions.is_empty() {
        println!("No transactions between {start} and {end}.");
        return Ok(());
    }

    let symbol = &settings.currency_symbol;
    println!(
        "Report {start} to {end}\n{}",
        render_register(&transactions, symbol)
    );
    let analysis = reports::analyze(&transactions);
    println!("\nTransaction Summary\n{}", render_analysis(&analysis, symbol));
    Ok(())
}

pub fn summary() -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&db_path())?;

    let transactions = ledger::get_all(&conn)?;
    let analysis = reports::analyze(&transactions);
    println!(
        "Ledger Summary\n{}",
        render_analysis(&analysis, &settings.currency_symbol)
    );
    Ok(())
}

pub fn monthly() -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&db_path())?;

    let transactions = ledger::get_all(&conn)?;
    let buckets = reports::monthly_breakdown(&transactions);
    if buckets.is_empty() {
        println!("No transactions available.");
        return Ok(());
    }

    let symbol = &settings.currency_symbol;
    let mut table = Table::new();
    table.set_header(vec!["Month", "Rent", "Light Bills", "Payments", "Net"]);
    for b in &buckets {
        table.add_row(vec![
            Cell::new(&b.month),
            Cell::new(money(b.rent, symbol)),
            Cell::new(money(b.light_bills, symbol)),
            Cell::new(money(b.payments, symbol)),
            Cell::new(money(b.net, symbol)),
        ]);
    }
    println!("Monthly Breakdown\n{table}");
    Ok(())
}
