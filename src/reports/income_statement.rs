//! Income Statement
//!
//! Revenue against expenses as posted to the journal.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::FarmbookResult;
use crate::models::{Account, JournalLine, Money};

use super::{export_error, DateRange};

/// Income Statement
#[derive(Debug, Clone)]
pub struct IncomeStatement {
    pub range: DateRange,
    /// Credits posted to revenue
    pub revenue: Money,
    /// Debits posted to each expense account, by account name
    pub expenses: Vec<(String, Money)>,
    pub total_expense: Money,
    pub net_income: Money,
}

impl IncomeStatement {
    /// Generate the statement for `range`
    pub fn generate(journal: &[JournalLine], range: DateRange) -> Self {
        let lines = range.filter(journal);
        Self::from_lines(&lines, range)
    }

    /// Compute from lines that are already filtered
    pub(crate) fn from_lines(lines: &[JournalLine], range: DateRange) -> Self {
        let revenue: Money = lines
            .iter()
            .filter(|l| l.account == Account::Revenue)
            .map(|l| l.credit)
            .sum();

        let mut by_account: BTreeMap<String, Money> = BTreeMap::new();
        for line in lines.iter().filter(|l| l.account.is_expense()) {
            *by_account.entry(line.account.name().to_string()).or_default() += line.debit;
        }

        let expenses: Vec<(String, Money)> = by_account.into_iter().collect();
        let total_expense = expenses.iter().map(|(_, amount)| *amount).sum();

        Self {
            range,
            revenue,
            expenses,
            total_expense,
            net_income: revenue - total_expense,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Income Statement ({})\n", self.range));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        output.push_str(&format!("{:<28} {:>20}\n", "Revenue", self.revenue));
        output.push('\n');
        output.push_str("Expenses\n");
        for (name, amount) in &self.expenses {
            output.push_str(&format!("  {:<26} {:>20}\n", name, amount));
        }
        output.push_str(&format!("{:<28} {:>20}\n", "Total Expenses", self.total_expense));
        output.push_str(&"-".repeat(50));
        output.push('\n');

        let label = if self.net_income.is_negative() {
            "Net Loss"
        } else {
            "Net Income"
        };
        output.push_str(&format!("{:<28} {:>20}\n", label, self.net_income));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FarmbookResult<()> {
        let mut out = csv::Writer::from_writer(writer);

        out.write_record(["Section", "Account", "Amount"])
            .map_err(export_error)?;
        out.write_record([
            "Revenue",
            Account::Revenue.name(),
            self.revenue.to_plain_string().as_str(),
        ])
        .map_err(export_error)?;
        for (name, amount) in &self.expenses {
            out.write_record(["Expense", name.as_str(), amount.to_plain_string().as_str()])
                .map_err(export_error)?;
        }
        out.write_record(["Total", "Expenses", self.total_expense.to_plain_string().as_str()])
            .map_err(export_error)?;
        out.write_record(["Total", "Net Income", self.net_income.to_plain_string().as_str()])
            .map_err(export_error)?;

        out.flush().map_err(export_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_revenue_minus_expenses() {
        let journal = vec![
            JournalLine::debit(at(1), Account::Cash, Money::from_units(100_000), ""),
            JournalLine::credit(at(1), Account::Revenue, Money::from_units(100_000), ""),
            JournalLine::debit(at(2), Account::Expense("Urea".into()), Money::from_units(30_000), ""),
            JournalLine::credit(at(2), Account::Payable, Money::from_units(30_000), ""),
            JournalLine::debit(at(3), Account::Expense("Solar".into()), Money::from_units(5_000), ""),
            JournalLine::credit(at(3), Account::Cash, Money::from_units(5_000), ""),
            JournalLine::debit(at(4), Account::Expense("Urea".into()), Money::from_units(1_000), ""),
            JournalLine::credit(at(4), Account::Bank, Money::from_units(1_000), ""),
            // Paying off a payable is not an expense
            JournalLine::debit(at(5), Account::Payable, Money::from_units(30_000), ""),
            JournalLine::credit(at(5), Account::Cash, Money::from_units(30_000), ""),
        ];

        let statement = IncomeStatement::generate(&journal, january());

        assert_eq!(statement.revenue, Money::from_units(100_000));
        assert_eq!(statement.total_expense, Money::from_units(36_000));
        assert_eq!(statement.net_income, Money::from_units(64_000));
        assert_eq!(
            statement.expenses,
            vec![
                ("Solar".to_string(), Money::from_units(5_000)),
                ("Urea".to_string(), Money::from_units(31_000)),
            ]
        );
    }

    #[test]
    fn test_empty_journal() {
        let statement = IncomeStatement::generate(&[], january());
        assert!(statement.revenue.is_zero());
        assert!(statement.net_income.is_zero());
        assert!(statement.expenses.is_empty());
    }

    #[test]
    fn test_csv_export() {
        let journal = vec![
            JournalLine::credit(at(1), Account::Revenue, Money::from_units(10), ""),
            JournalLine::debit(at(1), Account::Expense("Urea".into()), Money::from_units(4), ""),
        ];
        let statement = IncomeStatement::generate(&journal, january());

        let mut csv_output = Vec::new();
        statement.export_csv(&mut csv_output).unwrap();

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.contains("Revenue,Pendapatan,10"));
        assert!(csv_string.contains("Expense,Urea,4"));
        assert!(csv_string.contains("Total,Net Income,6"));
    }
}
