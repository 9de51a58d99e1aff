use crate::cli::{parse_date, require_session};
use crate::db::get_connection;
use crate::error::{LodgerError, Result};
use crate::fmt::money;
use crate::ledger;
use crate::models::TransactionPatch;
use crate::settings::{db_path, load_settings};

pub fn run(id: i64, date: Option<&str>, amount: Option<f64>, remark: Option<&str>) -> Result<()> {
    let patch = TransactionPatch {
        date: date.map(parse_date).transpose()?,
        amount,
        remark: remark.map(str::to_string),
    };
    if patch.is_empty() {
        return Err(LodgerError::Other(
            "nothing to edit: pass at least one of --date, --amount, --remark".to_string(),
        ));
    }

    let settings = load_settings();
    let session = require_session(&settings)?;
    let conn = get_connection(&db_path())?;

    let updated = ledger::update(&conn, &session, id, &patch)?;
    let symbol = &settings.currency_symbol;
    println!(
        "Updated transaction {}: {} {} '{}'",
        updated.id,
        updated.date,
        money(updated.amount, symbol),
        updated.remark
    );
    println!(
        "Current balance: {}",
        money(ledger::current_balance(&conn)?, symbol)
    );
    Ok(())
}
