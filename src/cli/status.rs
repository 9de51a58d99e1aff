use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::ledger;
use crate::settings::{db_path, load_settings};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let path = db_path();
    let conn = get_connection(&path)?;

    println!("Database: {}", path.display());
    let total = ledger::count(&conn)?;
    println!("Transactions: {total}");

    if total > 0 {
        let all = ledger::get_all(&conn)?;
        // get_all is chronological, so the span is first..last
        println!(
            "Date range: {} to {}",
            all.first().map(|t| t.date.to_string()).unwrap_or_default(),
            all.last().map(|t| t.date.to_string()).unwrap_or_default()
        );
    }
    println!(
        "Current balance: {}",
        money(ledger::current_balance(&conn)?, &settings.currency_symbol)
    );
    Ok(())
}
