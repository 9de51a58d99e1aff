use crate::cli::{parse_date, require_session};
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::ledger;
use crate::models::NewTransaction;
use crate::settings::{db_path, load_settings};

pub fn run(date: &str, amount: f64, remark: &str) -> Result<()> {
    let settings = load_settings();
    let session = require_session(&settings)?;
    let conn = get_connection(&db_path())?;

    let new = NewTransaction {
        date: parse_date(date)?,
        amount,
        remark: remark.to_string(),
    };
    let id = ledger::insert(&conn, &session, &new)?;

    let symbol = &settings.currency_symbol;
    println!("Added transaction {id}: {} {}", new.date, money(amount, symbol));
    println!(
        "Current balance: {}",
        money(ledger::current_balance(&conn)?, symbol)
    );
    Ok(())
}
