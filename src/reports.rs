use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::error::Result;
use crate::ledger;
use crate::models::Transaction;

// Category tags are case-sensitive substrings of the free-text remark,
// matching how the ledger data has always been entered.
const RENT_TAG: &str = "Rent";
const LIGHT_BILL_TAG: &str = "Light Bill";
const PAYMENT_TAG: &str = "Payment";

/// Date-bounded read-only view, inclusive on both ends. Remark filtering is
/// not applied here; `analyze` layers category sums on top.
pub fn generate_report(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
    ledger::query_range(conn, start, end)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub total_rent: f64,
    pub total_light_bills: f64,
    pub total_payments: f64,
    pub avg_monthly_rent: f64,
    pub avg_light_bill: f64,
    pub num_payments: usize,
    pub current_balance: f64,
}

fn sum_and_count(transactions: &[Transaction], tag: &str) -> (f64, usize) {
    let matching = transactions.iter().filter(|t| t.remark.contains(tag));
    let mut sum = 0.0;
    let mut count = 0usize;
    for t in matching {
        sum += t.amount;
        count += 1;
    }
    (sum, count)
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Aggregate statistics over an already-filtered, chronologically ordered
/// slice. Payments are stored negative by convention and reported as an
/// absolute value. Empty input yields a zero balance, never a panic.
pub fn analyze(transactions: &[Transaction]) -> Analysis {
    let (rent_sum, rent_count) = sum_and_count(transactions, RENT_TAG);
    let (light_sum, light_count) = sum_and_count(transactions, LIGHT_BILL_TAG);
    let (payment_sum, payment_count) = sum_and_count(transactions, PAYMENT_TAG);

    Analysis {
        total_rent: rent_sum,
        total_light_bills: light_sum,
        total_payments: payment_sum.abs(),
        avg_monthly_rent: mean(rent_sum, rent_count),
        avg_light_bill: mean(light_sum, light_count),
        num_payments: payment_count,
        current_balance: transactions.last().map(|t| t.running_total).unwrap_or(0.0),
    }
}

/// Per-month category sums, the textual stand-in for the old trend charts.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub month: String,
    pub rent: f64,
    pub light_bills: f64,
    pub payments: f64,
    pub net: f64,
}

pub fn monthly_breakdown(transactions: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<String, MonthlyBucket> = BTreeMap::new();
    for t in transactions {
        let month = t.date.format("%Y-%m").to_string();
        let bucket = buckets.entry(month.clone()).or_insert(MonthlyBucket {
            month,
            rent: 0.0,
            light_bills: 0.0,
            payments: 0.0,
            net: 0.0,
        });
        if t.remark.contains(RENT_TAG) {
            bucket.rent += t.amount;
        }
        if t.remark.contains(LIGHT_BILL_TAG) {
            bucket.light_bills += t.amount;
        }
        if t.remark.contains(PAYMENT_TAG) {
            bucket.payments += t.amount.abs();
        }
        bucket.net += t.amount;
    }
    buckets.into_values().collect()
}

/// Write a report as CSV: `id,date,amount,remark,running_total`.
pub fn export_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["id", "date", "amount", "remark", "running_total"])?;
    for t in transactions {
        wtr.write_record([
            t.id.to_string(),
            t.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", t.amount),
            t.remark.clone(),
            format!("{:.2}", t.running_total),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Default export filename for a date window.
pub fn report_filename(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "rent_report_{}_{}.csv",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: i64, date: &str, amount: f64, remark: &str, running_total: f64) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            remark: remark.to_string(),
            running_total,
        }
    }

    #[test]
    fn test_analyze_empty_set() {
        let analysis = analyze(&[]);
        assert_eq!(analysis.current_balance, 0.0);
        assert_eq!(analysis.total_rent, 0.0);
        assert_eq!(analysis.avg_monthly_rent, 0.0);
        assert_eq!(analysis.num_payments, 0);
    }

    #[test]
    fn test_analyze_scenario() {
        let txs = vec![
            tx(1, "2024-01-01", 1000.0, "Rent", 1000.0),
            tx(2, "2024-01-05", -200.0, "Payment", 800.0),
        ];
        let analysis = analyze(&txs);
        assert_eq!(analysis.total_rent, 1000.0);
        assert_eq!(analysis.total_payments, 200.0);
        assert_eq!(analysis.num_payments, 1);
        assert_eq!(analysis.current_balance, 800.0);
    }

    #[test]
    fn test_analyze_averages() {
        let txs = vec![
            tx(1, "2024-01-01", 1000.0, "Rent", 1000.0),
            tx(2, "2024-02-01", 1200.0, "Rent", 2200.0),
            tx(3, "2024-02-10", 300.0, "Light Bill", 2500.0),
        ];
        let analysis = analyze(&txs);
        assert_eq!(analysis.avg_monthly_rent, 1100.0);
        assert_eq!(analysis.avg_light_bill, 300.0);
        assert_eq!(analysis.total_light_bills, 300.0);
    }

    #[test]
    fn test_analyze_substring_match_is_case_sensitive() {
        let txs = vec![tx(1, "2024-01-01", 1000.0, "rent for march", 1000.0)];
        let analysis = analyze(&txs);
        assert_eq!(analysis.total_rent, 0.0);
    }

    #[test]
    fn test_analyze_substring_match_inside_longer_remark() {
        let txs = vec![tx(1, "2024-01-01", 1000.0, "March Rent (late)", 1000.0)];
        let analysis = analyze(&txs);
        assert_eq!(analysis.total_rent, 1000.0);
    }

    #[test]
    fn test_analyze_remark_may_match_multiple_categories() {
        let txs = vec![tx(1, "2024-01-01", -100.0, "Payment towards Rent", -100.0)];
        let analysis = analyze(&txs);
        assert_eq!(analysis.total_rent, -100.0);
        assert_eq!(analysis.total_payments, 100.0);
    }

    #[test]
    fn test_monthly_breakdown() {
        let txs = vec![
            tx(1, "2024-01-01", 1000.0, "Rent", 1000.0),
            tx(2, "2024-01-10", 250.0, "Light Bill", 1250.0),
            tx(3, "2024-01-20", -500.0, "Payment", 750.0),
            tx(4, "2024-02-01", 1000.0, "Rent", 1750.0),
        ];
        let buckets = monthly_breakdown(&txs);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].month, "2024-01");
        assert_eq!(buckets[0].rent, 1000.0);
        assert_eq!(buckets[0].light_bills, 250.0);
        assert_eq!(buckets[0].payments, 500.0);
        assert_eq!(buckets[0].net, 750.0);
        assert_eq!(buckets[1].month, "2024-02");
        assert_eq!(buckets[1].net, 1000.0);
    }

    #[test]
    fn test_export_csv_columns() {
        let txs = vec![
            tx(1, "2024-01-01", 1000.0, "Rent", 1000.0),
            tx(2, "2024-01-05", -200.0, "Payment", 800.0),
        ];
        let mut out = Vec::new();
        export_csv(&txs, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,date,amount,remark,running_total"));
        assert_eq!(lines.next(), Some("1,2024-01-01,1000.00,Rent,1000.00"));
        assert_eq!(lines.next(), Some("2,2024-01-05,-200.00,Payment,800.00"));
    }

    #[test]
    fn test_report_filename_pattern() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(
            report_filename(start, end),
            "rent_report_2024-01-01_2024-03-31.csv"
        );
    }
}
