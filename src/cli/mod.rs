pub mod add;
pub mod check;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod report;
pub mod status;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use zeroize::Zeroize;

use crate::auth::{self, Session};
use crate::error::{LodgerError, Result};
use crate::settings::Settings;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| LodgerError::Other(format!("invalid date '{raw}', expected YYYY-MM-DD")))
}

/// Authenticate against the configured admin credential and return the
/// session that write operations require. `LODGER_USER` / `LODGER_PASSWORD`
/// override the interactive prompt for scripting.
pub(crate) fn require_session(settings: &Settings) -> Result<Session> {
    let creds = settings.admin.as_ref().ok_or_else(|| {
        LodgerError::Settings(
            "no administrator credential configured; run `lodger init` first".to_string(),
        )
    })?;
    let username = std::env::var("LODGER_USER").unwrap_or_else(|_| creds.username.clone());
    let mut password = match std::env::var("LODGER_PASSWORD") {
        Ok(p) => p,
        Err(_) => rpassword::prompt_password(format!("Password for {username}: "))?,
    };
    let session = auth::login(creds, &username, &password);
    password.zeroize();
    session
}

#[derive(Parser)]
#[command(name = "lodger", about = "Rent and expense ledger CLI with running balances.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up lodger: choose a data directory, initialize the database,
    /// and set the administrator credential.
    Init {
        /// Path for lodger data (default: ~/Documents/lodger)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Administrator username (default: admin)
        #[arg(long)]
        user: Option<String>,
    },
    /// Add a transaction (negative amount for a payment/credit).
    Add {
        /// Date: YYYY-MM-DD
        date: String,
        /// Signed amount; negative values are payments/credits
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Free-text remark, e.g. 'Rent', 'Light Bill', 'Payment'
        #[arg(long, default_value = "")]
        remark: String,
    },
    /// List all transactions with running totals.
    List,
    /// Edit fields of an existing transaction.
    Edit {
        /// Transaction id (shown in `lodger list`)
        id: i64,
        /// New date: YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// New signed amount
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<f64>,
        /// New remark
        #[arg(long)]
        remark: Option<String>,
    },
    /// Delete one or more transactions by id.
    Delete {
        /// Transaction ids (shown in `lodger list`)
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Replace the entire ledger with the contents of a CSV file.
    Import {
        /// Path to CSV file with Date,Amount,Remark columns (DD-MM-YYYY dates)
        file: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Generate reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Export a date-range report to CSV.
    Export {
        /// Start date: YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// End date: YYYY-MM-DD
        #[arg(long)]
        to: String,
        /// Output path (default: <data_dir>/exports/rent_report_<from>_<to>.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Verify the running-total column; repair it with --fix.
    Check {
        /// Recompute and write back any inconsistent totals
        #[arg(long)]
        fix: bool,
    },
    /// Show current database and summary statistics.
    Status,
    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Transactions and aggregate statistics for an inclusive date window.
    Range {
        /// Start date: YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// End date: YYYY-MM-DD
        #[arg(long)]
        to: String,
    },
    /// Aggregate statistics over the whole ledger.
    Summary,
    /// Per-month rent / light bill / payment breakdown.
    Monthly,
}
