use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub remark: String,
    pub running_total: f64,
}

/// A transaction as supplied by the user, before the store assigns an id
/// and a running total.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub remark: String,
}

/// Per-field edit of an existing transaction. `None` leaves a field as-is.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub remark: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.amount.is_none() && self.remark.is_none()
    }
}
