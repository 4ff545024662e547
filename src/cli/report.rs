//! CLI commands for reports
//!
//! Provides commands for generating and exporting the period reports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::auth::UserContext;
use crate::config::settings::Settings;
use crate::error::{FarmbookError, FarmbookResult};
use crate::models::{Account, ExpenseRecord, IncomeRecord, JournalLine};
use crate::reports::{
    accounts_in, BalanceSheet, DateRange, FinancialReport, GeneralJournalReport, IncomeStatement,
    LedgerReport, SummaryReport,
};
use crate::storage::{RecordStore, Table};

/// Period and output options shared by every report
#[derive(Args, Debug, Clone, Default)]
pub struct ReportOptions {
    /// Start date (YYYY-MM-DD), defaults to the first of this month
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub end: Option<String>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expense and net totals with a monthly trend
    Summary(ReportOptions),

    /// The general journal
    Journal(ReportOptions),

    /// Postings and running balance of one account
    Ledger {
        /// Account name (e.g., "Kas", "Utang Dagang", "Urea")
        account: String,

        #[command(flatten)]
        options: ReportOptions,
    },

    /// Accounts with postings in the period
    Accounts(ReportOptions),

    /// Revenue against expenses
    #[command(alias = "laba-rugi")]
    IncomeStatement(ReportOptions),

    /// Assets against liabilities and equity
    #[command(alias = "neraca")]
    BalanceSheet(ReportOptions),

    /// Every report at once
    All(ReportOptions),
}

fn parse_report_date(value: &str, which: &str) -> FarmbookResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        FarmbookError::Validation(format!(
            "Invalid {} date format: {}. Use YYYY-MM-DD",
            which, value
        ))
    })
}

impl ReportOptions {
    /// Resolve the period, defaulting to month-to-date
    pub fn date_range(&self, today: NaiveDate) -> FarmbookResult<DateRange> {
        let default = DateRange::month_to_date(today);
        let start = match &self.start {
            Some(s) => parse_report_date(s, "start")?,
            None => default.start(),
        };
        let end = match &self.end {
            Some(e) => parse_report_date(e, "end")?,
            None => default.end(),
        };
        DateRange::new(start, end)
    }
}

/// Print to the terminal, or write CSV when an output path is given
fn emit<F>(output: Option<&Path>, terminal: String, export: F) -> FarmbookResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> FarmbookResult<()>,
{
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FarmbookError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            export(&mut writer)?;
            writer
                .flush()
                .map_err(|e| FarmbookError::Export(e.to_string()))?;
            println!("Report exported to: {}", path.display());
        }
        None => println!("{}", terminal),
    }
    Ok(())
}

/// Handle report commands
pub fn handle_report_command<S: RecordStore>(
    store: &S,
    settings: &Settings,
    user: &UserContext,
    cmd: ReportCommands,
) -> FarmbookResult<()> {
    let today = chrono::Local::now().date_naive();

    match cmd {
        ReportCommands::Summary(options) => {
            let range = options.date_range(today)?;
            let income: Table<IncomeRecord> = store.load(user);
            let expenses: Table<ExpenseRecord> = store.load(user);
            let report = SummaryReport::generate(income.rows(), expenses.rows(), range);
            emit(options.output.as_deref(), report.format_terminal(), |w| {
                report.export_csv(w)
            })
        }

        ReportCommands::Journal(options) => {
            let range = options.date_range(today)?;
            let journal: Table<JournalLine> = store.load(user);
            let report = GeneralJournalReport::generate(journal.rows(), range);
            emit(options.output.as_deref(), report.format_terminal(), |w| {
                report.export_csv(w)
            })
        }

        ReportCommands::Ledger { account, options } => {
            let range = options.date_range(today)?;
            let journal: Table<JournalLine> = store.load(user);
            let report = LedgerReport::generate(journal.rows(), &Account::from_name(&account), range);
            emit(options.output.as_deref(), report.format_terminal(), |w| {
                report.export_csv(w)
            })
        }

        ReportCommands::Accounts(options) => {
            let range = options.date_range(today)?;
            let journal: Table<JournalLine> = store.load(user);
            let accounts = accounts_in(journal.rows(), range);

            let mut terminal = format!("Accounts ({})\n", range);
            if accounts.is_empty() {
                terminal.push_str("No journal entries in this period.\n");
            }
            for account in &accounts {
                terminal.push_str(&format!("  {}\n", account));
            }

            emit(options.output.as_deref(), terminal, |w| {
                let mut out = csv::Writer::from_writer(w);
                out.write_record(["Account"])?;
                for account in &accounts {
                    out.write_record([account.name()])?;
                }
                out.flush()?;
                Ok(())
            })
        }

        ReportCommands::IncomeStatement(options) => {
            let range = options.date_range(today)?;
            let journal: Table<JournalLine> = store.load(user);
            let report = IncomeStatement::generate(journal.rows(), range);
            emit(options.output.as_deref(), report.format_terminal(), |w| {
                report.export_csv(w)
            })
        }

        ReportCommands::BalanceSheet(options) => {
            let range = options.date_range(today)?;
            let journal: Table<JournalLine> = store.load(user);
            let report = BalanceSheet::generate(journal.rows(), range, settings.balance_tolerance);
            emit(options.output.as_deref(), report.format_terminal(), |w| {
                report.export_csv(w)
            })
        }

        ReportCommands::All(options) => {
            let range = options.date_range(today)?;
            let report =
                FinancialReport::generate_with_tolerance(store, user, range, settings.balance_tolerance);
            emit(options.output.as_deref(), report.format_terminal(), |w| {
                report.export_csv(w)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_range_is_month_to_date() {
        let range = ReportOptions::default().date_range(ymd(2025, 6, 18)).unwrap();
        assert_eq!(range.start(), ymd(2025, 6, 1));
        assert_eq!(range.end(), ymd(2025, 6, 18));
    }

    #[test]
    fn test_explicit_range() {
        let options = ReportOptions {
            start: Some("2025-01-01".into()),
            end: Some("2025-03-31".into()),
            output: None,
        };
        let range = options.date_range(ymd(2025, 6, 18)).unwrap();
        assert_eq!(range.start(), ymd(2025, 1, 1));
        assert_eq!(range.end(), ymd(2025, 3, 31));
    }

    #[test]
    fn test_bad_dates() {
        let reversed = ReportOptions {
            start: Some("2025-02-01".into()),
            end: Some("2025-01-01".into()),
            output: None,
        };
        assert!(reversed.date_range(ymd(2025, 6, 18)).unwrap_err().is_validation());

        let garbled = ReportOptions {
            start: Some("kemarin".into()),
            ..Default::default()
        };
        assert!(garbled.date_range(ymd(2025, 6, 18)).unwrap_err().is_validation());
    }
}
