use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::auth::Session;
use crate::error::{LodgerError, Result};

const EXPECTED_HEADER: [&str; 3] = ["Date", "Amount", "Remark"];

/// One validated row from an import file, date already normalized to ISO.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub date: NaiveDate,
    pub amount: f64,
    pub remark: String,
}

fn malformed(line: usize, reason: impl Into<String>) -> LodgerError {
    LodgerError::MalformedInput {
        line,
        reason: reason.into(),
    }
}

/// Parse an import file strictly: `Date,Amount,Remark` header, `DD-MM-YYYY`
/// dates, numeric amounts. Any bad row fails the whole parse — partial
/// imports would silently corrupt the running totals.
pub fn parse_csv(file_path: &Path) -> Result<Vec<CsvRow>> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers != EXPECTED_HEADER {
        return Err(malformed(
            1,
            format!(
                "expected header '{}', found '{}'",
                EXPECTED_HEADER.join(","),
                headers.join(",")
            ),
        ));
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 2);

        if record.len() < 2 {
            return Err(malformed(line, "expected at least Date and Amount fields"));
        }
        let date = NaiveDate::parse_from_str(record[0].trim(), "%d-%m-%Y")
            .map_err(|_| malformed(line, format!("unparseable date '{}'", record[0].trim())))?;
        let amount: f64 = record[1]
            .trim()
            .parse()
            .map_err(|_| malformed(line, format!("unparseable amount '{}'", record[1].trim())))?;
        let remark = record.get(2).unwrap_or("").trim().to_string();

        rows.push(CsvRow {
            date,
            amount,
            remark,
        });
    }
    Ok(rows)
}

/// Replace the entire store with the contents of a CSV file.
///
/// The file is parsed in full before the database is touched, and the
/// clear + bulk insert run inside one SQL transaction, so a failed import
/// leaves the previous ledger intact. Running totals are accumulated from
/// zero during the sorted insert; no recompute pass is needed afterwards.
pub fn import_file(conn: &mut Connection, session: &Session, file_path: &Path) -> Result<usize> {
    let mut rows = parse_csv(file_path)?;
    // Stable sort keeps file order for same-date rows
    rows.sort_by_key(|r| r.date);

    let tx = conn.transaction()?;
    crate::ledger::delete_all(&tx, session)?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions (date, amount, remark, running_total) VALUES (?1, ?2, ?3, ?4)",
        )?;
        let mut total = 0.0;
        for row in &rows {
            total += row.amount;
            stmt.execute(rusqlite::params![
                row.date.format("%Y-%m-%d").to_string(),
                row.amount,
                row.remark,
                total,
            ])?;
        }
    }
    tx.commit()?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};
    use crate::ledger;
    use crate::models::NewTransaction;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn session() -> Session {
        Session {
            username: "admin".to_string(),
        }
    }

    fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_csv_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "in.csv",
            "Date,Amount,Remark\n01-01-2024,1000,Rent\n05-01-2024,-200,Payment\n",
        );
        let rows = parse_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date.to_string(), "2024-01-01");
        assert_eq!(rows[0].amount, 1000.0);
        assert_eq!(rows[1].remark, "Payment");
    }

    #[test]
    fn test_parse_csv_rejects_bad_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "in.csv", "date,amt,note\n01-01-2024,1000,Rent\n");
        let err = parse_csv(&path).unwrap_err();
        assert!(matches!(err, LodgerError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_parse_csv_rejects_bad_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "in.csv",
            "Date,Amount,Remark\n2024-01-01,1000,Rent\n",
        );
        let err = parse_csv(&path).unwrap_err();
        assert!(matches!(err, LodgerError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_parse_csv_rejects_bad_amount() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "in.csv",
            "Date,Amount,Remark\n01-01-2024,1000,Rent\n05-01-2024,oops,Payment\n",
        );
        let err = parse_csv(&path).unwrap_err();
        assert!(matches!(err, LodgerError::MalformedInput { line: 3, .. }));
    }

    #[test]
    fn test_parse_csv_remark_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "in.csv", "Date,Amount,Remark\n01-01-2024,1000,\n");
        let rows = parse_csv(&path).unwrap();
        assert_eq!(rows[0].remark, "");
    }

    #[test]
    fn test_import_replaces_store_and_computes_totals() {
        let (dir, mut conn) = test_db();
        let s = session();
        ledger::insert(
            &conn,
            &s,
            &NewTransaction {
                date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                amount: 9999.0,
                remark: "stale".to_string(),
            },
        )
        .unwrap();

        // Rows deliberately out of date order
        let path = write_csv(
            dir.path(),
            "in.csv",
            "Date,Amount,Remark\n05-01-2024,-200,Payment\n01-01-2024,1000,Rent\n",
        );
        let imported = import_file(&mut conn, &s, &path).unwrap();
        assert_eq!(imported, 2);

        let all = ledger::get_all(&conn).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].remark, "Rent");
        assert_eq!(all[0].running_total, 1000.0);
        assert_eq!(all[1].running_total, 800.0);
    }

    #[test]
    fn test_import_starts_totals_from_zero() {
        let (dir, mut conn) = test_db();
        let s = session();
        ledger::insert(
            &conn,
            &s,
            &NewTransaction {
                date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                amount: 5000.0,
                remark: "prior balance".to_string(),
            },
        )
        .unwrap();

        let path = write_csv(dir.path(), "in.csv", "Date,Amount,Remark\n01-01-2024,100,Rent\n");
        import_file(&mut conn, &s, &path).unwrap();

        // Cleared store: totals must not chain onto the old balance
        assert_eq!(ledger::current_balance(&conn).unwrap(), 100.0);
    }

    #[test]
    fn test_failed_import_leaves_store_unchanged() {
        let (dir, mut conn) = test_db();
        let s = session();
        ledger::insert(
            &conn,
            &s,
            &NewTransaction {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                amount: 1000.0,
                remark: "Rent".to_string(),
            },
        )
        .unwrap();

        let path = write_csv(
            dir.path(),
            "bad.csv",
            "Date,Amount,Remark\n01-01-2024,100,Rent\n02-01-2024,not_a_number,Rent\n",
        );
        assert!(import_file(&mut conn, &s, &path).is_err());

        let all = ledger::get_all(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].remark, "Rent");
        assert_eq!(all[0].running_total, 1000.0);
    }

    #[test]
    fn test_import_same_date_keeps_file_order() {
        let (dir, mut conn) = test_db();
        let s = session();
        let path = write_csv(
            dir.path(),
            "in.csv",
            "Date,Amount,Remark\n01-01-2024,100,first\n01-01-2024,200,second\n",
        );
        import_file(&mut conn, &s, &path).unwrap();
        let all = ledger::get_all(&conn).unwrap();
        assert_eq!(all[0].remark, "first");
        assert_eq!(all[1].remark, "second");
        assert_eq!(all[1].running_total, 300.0);
    }
}
