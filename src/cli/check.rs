use comfy_table::{Cell, Table};

use crate::cli::require_session;
use crate::db::get_connection;
use crate::error::{LodgerError, Result};
use crate::fmt::money;
use crate::ledger;
use crate::settings::{db_path, load_settings};

pub fn run(fix: bool) -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&db_path())?;

    let discrepancies = ledger::verify_running_totals(&conn)?;
    if discrepancies.is_empty() {
        println!("Running totals are consistent ({} transaction(s)).", ledger::count(&conn)?);
        return Ok(());
    }

    let symbol = &settings.currency_symbol;
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Stored", "Expected"]);
    for d in &discrepancies {
        table.add_row(vec![
            Cell::new(d.id),
            Cell::new(d.date),
            Cell::new(money(d.stored, symbol)),
            Cell::new(money(d.expected, symbol)),
        ]);
    }
    println!("Inconsistent running totals\n{table}");

    if !fix {
        return Err(LodgerError::Other(format!(
            "{} running total(s) out of date; run `lodger check --fix` to repair",
            discrepancies.len()
        )));
    }

    let _session = require_session(&settings)?;
    ledger::recompute_running_totals(&conn)?;
    println!("Repaired {} running total(s).", discrepancies.len());
    Ok(())
}
