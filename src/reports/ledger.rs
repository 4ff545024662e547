//! Ledger Report
//!
//! The postings of a single account in date order with a running balance.

use std::io::Write;

use chrono::NaiveDateTime;

use crate::error::FarmbookResult;
use crate::models::{Account, JournalLine, Money};

use super::{export_error, DateRange};

/// A single row in the ledger
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub date: NaiveDateTime,
    pub note: String,
    pub debit: Money,
    pub credit: Money,
    /// Debit minus credit for this posting
    pub balance: Money,
    /// Sum of `balance` up to and including this posting
    pub running_balance: Money,
}

/// Ledger Report for one account
#[derive(Debug, Clone)]
pub struct LedgerReport {
    pub account: Account,
    pub range: DateRange,
    pub entries: Vec<LedgerEntry>,
}

impl LedgerReport {
    /// Generate the ledger of `account` over `range`
    pub fn generate(journal: &[JournalLine], account: &Account, range: DateRange) -> Self {
        let mut lines: Vec<JournalLine> = range
            .filter(journal)
            .into_iter()
            .filter(|l| &l.account == account)
            .collect();
        lines.sort_by_key(|l| l.date);

        let mut running_balance = Money::zero();
        let entries = lines
            .into_iter()
            .filter_map(|line| {
                let date = line.date?;
                let balance = line.balance();
                running_balance += balance;
                Some(LedgerEntry {
                    date,
                    note: line.note,
                    debit: line.debit,
                    credit: line.credit,
                    balance,
                    running_balance,
                })
            })
            .collect();

        Self {
            account: account.clone(),
            range,
            entries,
        }
    }

    /// Balance after the last posting
    pub fn closing_balance(&self) -> Money {
        self.entries
            .last()
            .map(|e| e.running_balance)
            .unwrap_or_default()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Ledger: {} ({})\n", self.account, self.range));
        output.push_str(&"=".repeat(90));
        output.push('\n');

        if self.entries.is_empty() {
            output.push_str("No postings to this account in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:>16} {:>16} {:>16} {:>16}  {}\n",
            "Date", "Debit", "Credit", "Balance", "Cumulative", "Note"
        ));
        output.push_str(&"-".repeat(90));
        output.push('\n');

        for entry in &self.entries {
            output.push_str(&format!(
                "{:<12} {:>16} {:>16} {:>16} {:>16}  {}\n",
                entry.date.format("%Y-%m-%d"),
                entry.debit,
                entry.credit,
                entry.balance,
                entry.running_balance,
                entry.note
            ));
        }

        output.push_str(&"-".repeat(90));
        output.push('\n');
        output.push_str(&format!("Closing balance: {}\n", self.closing_balance()));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FarmbookResult<()> {
        let mut out = csv::Writer::from_writer(writer);

        out.write_record([
            "Account",
            "Date",
            "Note",
            "Debit",
            "Credit",
            "Balance",
            "Running Balance",
        ])
        .map_err(export_error)?;

        for entry in &self.entries {
            out.write_record([
                self.account.name().to_string(),
                entry.date.format("%Y-%m-%d").to_string(),
                entry.note.clone(),
                entry.debit.to_plain_string(),
                entry.credit.to_plain_string(),
                entry.balance.to_plain_string(),
                entry.running_balance.to_plain_string(),
            ])
            .map_err(export_error)?;
        }

        out.flush().map_err(export_error)?;
        Ok(())
    }
}

/// Accounts posted to within `range`, in order of first appearance
pub fn accounts_in(journal: &[JournalLine], range: DateRange) -> Vec<Account> {
    let mut accounts: Vec<Account> = Vec::new();
    for line in journal.iter().filter(|l| range.contains(l.date)) {
        if !accounts.contains(&line.account) {
            accounts.push(line.account.clone());
        }
    }
    accounts
}
