//! Balance Sheet
//!
//! Assets against liabilities plus equity, where equity is the period's net
//! income from the income statement.

use std::io::Write;

use crate::error::FarmbookResult;
use crate::models::{Account, JournalLine, Money};

use super::income_statement::IncomeStatement;
use super::{export_error, DateRange};

/// Balance Sheet
#[derive(Debug, Clone)]
pub struct BalanceSheet {
    pub range: DateRange,
    pub cash: Money,
    pub bank: Money,
    pub receivable: Money,
    pub total_assets: Money,
    pub payable: Money,
    pub total_liabilities: Money,
    pub equity: Money,
    /// Largest gap still reported as balanced
    pub tolerance: Money,
}

impl BalanceSheet {
    /// Generate the balance sheet for `range`
    pub fn generate(journal: &[JournalLine], range: DateRange, tolerance: Money) -> Self {
        let lines = range.filter(journal);

        // Assets carry debit balances, liabilities credit balances
        let debit_balance = |account: &Account| -> Money {
            lines
                .iter()
                .filter(|l| &l.account == account)
                .map(JournalLine::balance)
                .sum()
        };

        let cash = debit_balance(&Account::Cash);
        let bank = debit_balance(&Account::Bank);
        let receivable = debit_balance(&Account::Receivable);
        let payable = -debit_balance(&Account::Payable);

        let equity = IncomeStatement::from_lines(&lines, range).net_income;

        Self {
            range,
            cash,
            bank,
            receivable,
            total_assets: cash + bank + receivable,
            payable,
            total_liabilities: payable,
            equity,
            tolerance,
        }
    }

    /// Total liabilities plus equity
    pub fn liabilities_and_equity(&self) -> Money {
        self.total_liabilities + self.equity
    }

    /// Assets minus liabilities and equity
    pub fn difference(&self) -> Money {
        self.total_assets - self.liabilities_and_equity()
    }

    /// Whether the sheet balances within the tolerance
    pub fn is_balanced(&self) -> bool {
        self.difference().abs() <= self.tolerance
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Balance Sheet ({})\n", self.range));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        output.push_str("ASSETS\n");
        output.push_str(&format!("  {:<26} {:>20}\n", Account::Cash, self.cash));
        output.push_str(&format!("  {:<26} {:>20}\n", Account::Bank, self.bank));
        output.push_str(&format!(
            "  {:<26} {:>20}\n",
            Account::Receivable,
            self.receivable
        ));
        output.push_str(&format!("{:<28} {:>20}\n", "Total Assets", self.total_assets));
        output.push('\n');

        output.push_str("LIABILITIES\n");
        output.push_str(&format!("  {:<26} {:>20}\n", Account::Payable, self.payable));
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            "Total Liabilities", self.total_liabilities
        ));
        output.push('\n');

        output.push_str("EQUITY\n");
        output.push_str(&format!("  {:<26} {:>20}\n", "Net Income", self.equity));
        output.push_str(&format!("{:<28} {:>20}\n", "Total Equity", self.equity));
        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            "Liabilities + Equity",
            self.liabilities_and_equity()
        ));

        if !self.is_balanced() {
            output.push_str(&format!(
                "\nWARNING: balance sheet is off by {}. Check your transactions.\n",
                self.difference()
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FarmbookResult<()> {
        let mut out = csv::Writer::from_writer(writer);

        let [cash, bank, receivable, payable, _] = Account::FIXED_NAMES;
        let rows = [
            ("Assets", cash, self.cash),
            ("Assets", bank, self.bank),
            ("Assets", receivable, self.receivable),
            ("Assets", "Total Assets", self.total_assets),
            ("Liabilities", payable, self.payable),
            ("Liabilities", "Total Liabilities", self.total_liabilities),
            ("Equity", "Net Income", self.equity),
            ("Equity", "Total Equity", self.equity),
            ("Total", "Liabilities + Equity", self.liabilities_and_equity()),
        ];

        out.write_record(["Section", "Item", "Amount"])
            .map_err(export_error)?;
        for (section, item, amount) in rows {
            out.write_record([section, item, amount.to_plain_string().as_str()])
                .map_err(export_error)?;
        }

        out.flush().map_err(export_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseMethod, IncomeMethod};
    use crate::services::{derive_expense_entry, derive_income_entry};
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

    fn derived_journal() -> Vec<JournalLine> {
        let mut journal = Vec::new();
        let mut add = |entry: crate::models::JournalEntry| journal.extend(entry.into_lines());

        add(derive_income_entry(at(1), "Penjualan Padi", Money::from_units(100_000), IncomeMethod::Cash));
        add(derive_income_entry(at(2), "Penjualan Padi", Money::from_units(40_000), IncomeMethod::Transfer));
        add(derive_income_entry(at(3), "Penjualan Padi", Money::from_units(60_000), IncomeMethod::Receivable));
        add(derive_income_entry(at(9), "Pelunasan", Money::from_units(20_000), IncomeMethod::ReceivablePayment));
        add(derive_expense_entry(at(4), "Urea", Money::from_units(50_000), ExpenseMethod::Payable, ""));
        add(derive_expense_entry(at(5), "Solar", Money::from_units(7_500), ExpenseMethod::Cash, ""));
        add(derive_expense_entry(at(6), "Cangkul", Money::from_units(12_000), ExpenseMethod::Transfer, ""));
        add(derive_expense_entry(at(10), "Urea", Money::from_units(30_000), ExpenseMethod::PayablePayment, ""));
        journal
    }

    #[test]
    fn test_balances() {
        let sheet = BalanceSheet::generate(&derived_journal(), january(), Money::from_units(1));

        assert_eq!(sheet.cash, Money::from_units(100_000 + 20_000 - 7_500 - 30_000));
        assert_eq!(sheet.bank, Money::from_units(40_000 - 12_000));
        assert_eq!(sheet.receivable, Money::from_units(60_000 - 20_000));
        assert_eq!(sheet.payable, Money::from_units(50_000 - 30_000));
        assert_eq!(
            sheet.equity,
            Money::from_units(200_000 - 50_000 - 7_500 - 12_000)
        );
    }

    #[test]
    fn test_derived_journal_always_balances() {
        let sheet = BalanceSheet::generate(&derived_journal(), january(), Money::from_units(1));

        assert!(sheet.difference().is_zero());
        assert!(sheet.is_balanced());
    }

    #[test]
    fn test_tolerance() {
        let mut journal = derived_journal();
        journal.push(JournalLine::debit(at(11), Account::Cash, Money::from_units(1), ""));

        let lenient = BalanceSheet::generate(&journal, january(), Money::from_units(1));
        assert!(lenient.is_balanced());

        journal.push(JournalLine::debit(at(11), Account::Cash, Money::from_cents(1), ""));
        let strict = BalanceSheet::generate(&journal, january(), Money::from_units(1));
        assert!(!strict.is_balanced());
        assert!(strict.format_terminal().contains("WARNING"));
    }

    #[test]
    fn test_csv_export() {
        let sheet = BalanceSheet::generate(&derived_journal(), january(), Money::from_units(1));

        let mut csv_output = Vec::new();
        sheet.export_csv(&mut csv_output).unwrap();

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.starts_with("Section,Item,Amount\n"));
        assert!(csv_string.contains("Assets,Kas,82500"));
        assert!(csv_string.contains("Liabilities,Utang Dagang,20000"));
    }
}
