use std::io::Write;
use std::path::PathBuf;

use crate::cli::require_session;
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::importer::import_file;
use crate::ledger;
use crate::settings::{db_path, load_settings};

pub fn run(file: &str, yes: bool) -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&db_path())?;

    if !yes {
        let existing = ledger::count(&conn)?;
        print!(
            "Import replaces the entire ledger ({existing} existing transaction(s) will be deleted). Proceed? [y/N] "
        );
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let session = require_session(&settings)?;
    let mut conn = conn;
    let imported = import_file(&mut conn, &session, &PathBuf::from(file))?;

    println!("Imported {imported} transaction(s)");
    println!(
        "Current balance: {}",
        money(ledger::current_balance(&conn)?, &settings.currency_symbol)
    );
    Ok(())
}
