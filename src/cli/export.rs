use std::path::PathBuf;

use crate::cli::parse_date;
use crate::db::get_connection;
use crate::error::Result;
use crate::reports;
use crate::settings::{db_path, get_data_dir};

pub fn run(from: &str, to: &str, output: Option<String>) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let start = parse_date(from)?;
    let end = parse_date(to)?;

    let transactions = reports::generate_report(&conn, start, end)?;

    let path = output.map(PathBuf::from).unwrap_or_else(|| {
        get_data_dir()
            .join("exports")
            .join(reports::report_filename(start, end))
    });
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(&path)?;
    reports::export_csv(&transactions, file)?;

    println!("Wrote {} ({} transaction(s))", path.display(), transactions.len());
    Ok(())
}
