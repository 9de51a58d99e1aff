use crate::cli::require_session;
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::ledger;
use crate::settings::{db_path, load_settings};

pub fn run(ids: &[i64]) -> Result<()> {
    let settings = load_settings();
    let session = require_session(&settings)?;
    let conn = get_connection(&db_path())?;

    let removed = ledger::delete(&conn, &session, ids)?;
    println!("Deleted {removed} record(s)");
    println!(
        "Current balance: {}",
        money(ledger::current_balance(&conn)?, &settings.currency_symbol)
    );
    Ok(())
}
