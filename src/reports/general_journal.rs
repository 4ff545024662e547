//! General Journal Report
//!
//! Every journal line in a period, oldest first, with column totals.

use std::io::Write;

use crate::error::FarmbookResult;
use crate::models::{JournalLine, Money, RECORD_DATE_FORMAT};

use super::{export_error, DateRange};

/// General Journal Report
#[derive(Debug, Clone)]
pub struct GeneralJournalReport {
    pub range: DateRange,
    /// Lines sorted by date; same-date lines keep their file order
    pub lines: Vec<JournalLine>,
    pub total_debit: Money,
    pub total_credit: Money,
}

impl GeneralJournalReport {
    /// Generate the journal for `range`
    pub fn generate(journal: &[JournalLine], range: DateRange) -> Self {
        let mut lines = range.filter(journal);
        lines.sort_by_key(|l| l.date);

        let total_debit = lines.iter().map(|l| l.debit).sum();
        let total_credit = lines.iter().map(|l| l.credit).sum();

        Self {
            range,
            lines,
            total_debit,
            total_credit,
        }
    }

    /// Whether the debit and credit columns agree
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("General Journal ({})\n", self.range));
        output.push_str(&"=".repeat(90));
        output.push('\n');

        if self.lines.is_empty() {
            output.push_str("No journal entries in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:<22} {:>16} {:>16}  {}\n",
            "Date", "Account", "Debit", "Credit", "Note"
        ));
        output.push_str(&"-".repeat(90));
        output.push('\n');

        for line in &self.lines {
            let date = line
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            output.push_str(&format!(
                "{:<12} {:<22} {:>16} {:>16}  {}\n",
                date, line.account, line.debit, line.credit, line.note
            ));
        }

        output.push_str(&"-".repeat(90));
        output.push('\n');
        output.push_str(&format!(
            "{:<35} {:>16} {:>16}\n",
            "Total", self.total_debit, self.total_credit
        ));
        if !self.is_balanced() {
            output.push_str("WARNING: debits and credits do not match\n");
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FarmbookResult<()> {
        let mut out = csv::Writer::from_writer(writer);

        out.write_record(["Tanggal", "Akun", "Debit", "Kredit", "Keterangan"])
            .map_err(export_error)?;
        for line in &self.lines {
            let date = line
                .date
                .map(|d| d.format(RECORD_DATE_FORMAT).to_string())
                .unwrap_or_default();
            out.write_record([
                date,
                line.account.name().to_string(),
                line.debit.to_plain_string(),
                line.credit.to_plain_string(),
                line.note.clone(),
            ])
            .map_err(export_error)?;
        }

        out.flush().map_err(export_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn january() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_sorted_by_date_with_stable_ties() {
        let journal = vec![
            JournalLine::debit(at(9), Account::Cash, Money::from_units(10), "b"),
            JournalLine::credit(at(9), Account::Revenue, Money::from_units(10), "b"),
            JournalLine::debit(at(2), Account::Bank, Money::from_units(5), "a"),
            JournalLine::credit(at(2), Account::Revenue, Money::from_units(5), "a"),
        ];

        let report = GeneralJournalReport::generate(&journal, january());
        let accounts: Vec<&Account> = report.lines.iter().map(|l| &l.account).collect();
        assert_eq!(
            accounts,
            vec![&Account::Bank, &Account::Revenue, &Account::Cash, &Account::Revenue]
        );
        assert_eq!(report.total_debit, Money::from_units(15));
        assert!(report.is_balanced());
    }

    #[test]
    fn test_unbalanced_journal_is_flagged() {
        let journal = vec![JournalLine::debit(
            at(3),
            Account::Cash,
            Money::from_units(10),
            "",
        )];

        let report = GeneralJournalReport::generate(&journal, january());
        assert!(!report.is_balanced());
        assert!(report.format_terminal().contains("do not match"));
    }

    #[test]
    fn test_csv_export() {
        let journal = vec![JournalLine::debit(
            at(3),
            Account::Receivable,
            Money::from_units(10),
            "gabah, 2 karung",
        )];

        let report = GeneralJournalReport::generate(&journal, january());
        let mut csv_output = Vec::new();
        report.export_csv(&mut csv_output).unwrap();

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.contains("Tanggal,Akun,Debit,Kredit,Keterangan"));
        assert!(csv_string.contains("2025-01-03 00:00:00,Piutang Dagang,10,0,\"gabah, 2 karung\""));
    }
}
