use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};

use crate::auth::Session;
use crate::error::{LodgerError, Result};
use crate::models::{NewTransaction, Transaction, TransactionPatch};

const SELECT_COLUMNS: &str = "id, date, amount, remark, running_total";

fn sql_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(1)?;
    Ok(Transaction {
        id: row.get(0)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
        amount: row.get(2)?,
        remark: row.get(3)?,
        running_total: row.get(4)?,
    })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// All transactions in chronological order, ties broken by insertion order.
pub fn get_all(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM transactions ORDER BY date, id"
    ))?;
    let rows = stmt.query_map([], row_to_transaction)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn get_by_id(conn: &Connection, id: i64) -> Result<Transaction> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM transactions WHERE id = ?1"
    ))?;
    stmt.query_row([id], row_to_transaction)
        .optional()?
        .ok_or(LodgerError::NotFound(id))
}

/// Transactions with `start <= date <= end`, chronological order.
pub fn query_range(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM transactions WHERE date BETWEEN ?1 AND ?2 ORDER BY date, id"
    ))?;
    let rows = stmt.query_map([sql_date(start), sql_date(end)], row_to_transaction)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Running total of the chronologically last transaction; zero when empty.
pub fn current_balance(conn: &Connection) -> Result<f64> {
    let last: Option<f64> = conn
        .query_row(
            "SELECT running_total FROM transactions ORDER BY date DESC, id DESC LIMIT 1",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(last.unwrap_or(0.0))
}

pub fn count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?)
}

// ---------------------------------------------------------------------------
// Mutations — every structural change re-establishes the running-total
// invariant before returning
// ---------------------------------------------------------------------------

/// Insert a single transaction.
///
/// An append at (or past) the current maximum date extends the running total
/// from the chronologically last row without a rescan. Anything earlier
/// shifts every later total, so the whole column is recomputed.
pub fn insert(conn: &Connection, _session: &Session, new: &NewTransaction) -> Result<i64> {
    let last: Option<(String, f64)> = conn
        .query_row(
            "SELECT date, running_total FROM transactions ORDER BY date DESC, id DESC LIMIT 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;

    let date = sql_date(new.date);
    match last {
        Some((max_date, last_total)) if date >= max_date => {
            conn.execute(
                "INSERT INTO transactions (date, amount, remark, running_total) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![date, new.amount, new.remark, last_total + new.amount],
            )?;
            Ok(conn.last_insert_rowid())
        }
        None => {
            conn.execute(
                "INSERT INTO transactions (date, amount, remark, running_total) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![date, new.amount, new.remark, new.amount],
            )?;
            Ok(conn.last_insert_rowid())
        }
        Some(_) => {
            conn.execute(
                "INSERT INTO transactions (date, amount, remark, running_total) VALUES (?1, ?2, ?3, 0)",
                rusqlite::params![date, new.amount, new.remark],
            )?;
            let id = conn.last_insert_rowid();
            recompute_running_totals(conn)?;
            Ok(id)
        }
    }
}

/// Apply the supplied fields to an existing transaction, then recompute.
pub fn update(
    conn: &Connection,
    _session: &Session,
    id: i64,
    patch: &TransactionPatch,
) -> Result<Transaction> {
    let existing = get_by_id(conn, id)?;

    let date = patch.date.unwrap_or(existing.date);
    let amount = patch.amount.unwrap_or(existing.amount);
    let remark = patch.remark.clone().unwrap_or(existing.remark);

    conn.execute(
        "UPDATE transactions SET date = ?1, amount = ?2, remark = ?3 WHERE id = ?4",
        rusqlite::params![sql_date(date), amount, remark, id],
    )?;
    recompute_running_totals(conn)?;

    get_by_id(conn, id)
}

/// Delete the given transactions, then recompute.
///
/// Every id must exist; a missing one fails the call before anything is
/// deleted, so a multi-select delete is all-or-nothing.
pub fn delete(conn: &Connection, _session: &Session, ids: &[i64]) -> Result<usize> {
    for &id in ids {
        get_by_id(conn, id)?;
    }
    let mut stmt = conn.prepare_cached("DELETE FROM transactions WHERE id = ?1")?;
    for &id in ids {
        stmt.execute([id])?;
    }
    recompute_running_totals(conn)?;
    Ok(ids.len())
}

pub fn delete_all(conn: &Connection, _session: &Session) -> Result<usize> {
    Ok(conn.execute("DELETE FROM transactions", [])?)
}

// ---------------------------------------------------------------------------
// Running-total engine
// ---------------------------------------------------------------------------

/// Single forward pass in `(date, id)` order, accumulating `amount` into
/// `running_total` from zero and writing back each row.
pub fn recompute_running_totals(conn: &Connection) -> Result<()> {
    let rows: Vec<(i64, f64)> = conn
        .prepare("SELECT id, amount FROM transactions ORDER BY date, id")?
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare_cached("UPDATE transactions SET running_total = ?1 WHERE id = ?2")?;
    let mut total = 0.0;
    for (id, amount) in rows {
        total += amount;
        stmt.execute(rusqlite::params![total, id])?;
    }
    Ok(())
}

/// A stored running total that disagrees with the recomputed one.
#[derive(Debug, Clone)]
pub struct Discrepancy {
    pub id: i64,
    pub date: NaiveDate,
    pub stored: f64,
    pub expected: f64,
}

/// Check the running-total invariant without modifying anything.
///
/// Float comparison uses a half-cent tolerance; amounts are stored as REAL
/// so exact equality would flag benign rounding noise.
pub fn verify_running_totals(conn: &Connection) -> Result<Vec<Discrepancy>> {
    let mut total = 0.0;
    let mut discrepancies = Vec::new();
    for tx in get_all(conn)? {
        total += tx.amount;
        if (tx.running_total - total).abs() > 0.005 {
            discrepancies.push(Discrepancy {
                id: tx.id,
                date: tx.date,
                stored: tx.running_total,
                expected: total,
            });
        }
    }
    Ok(discrepancies)
}
