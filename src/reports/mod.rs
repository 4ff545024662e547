//! Reports module for Farmbook
//!
//! Provides the period reports built from a user's tables: a financial
//! summary, the general journal, per-account ledgers, the income statement
//! and the balance sheet. Each report renders for the terminal and exports
//! as CSV.

pub mod balance_sheet;
pub mod filter;
pub mod general_journal;
pub mod income_statement;
pub mod ledger;
pub mod summary;

pub use balance_sheet::BalanceSheet;
pub use filter::DateRange;
pub use general_journal::GeneralJournalReport;
pub use income_statement::IncomeStatement;
pub use ledger::{accounts_in, LedgerEntry, LedgerReport};
pub use summary::{MonthlyTotals, SummaryReport};

use std::io::Write;

use crate::auth::UserContext;
use crate::config::Settings;
use crate::error::{FarmbookError, FarmbookResult};
use crate::models::{ExpenseRecord, IncomeRecord, JournalLine, Money};
use crate::storage::{RecordStore, Table};

pub(crate) fn export_error(e: impl std::fmt::Display) -> FarmbookError {
    FarmbookError::Export(e.to_string())
}

/// Every report for one user and period
#[derive(Debug, Clone)]
pub struct FinancialReport {
    pub summary: SummaryReport,
    pub journal: GeneralJournalReport,
    /// One ledger per account posted to in the period
    pub ledgers: Vec<LedgerReport>,
    pub income_statement: IncomeStatement,
    pub balance_sheet: BalanceSheet,
}

impl FinancialReport {
    /// Load the user's tables and compute every report over `range`
    pub fn generate<S: RecordStore>(store: &S, user: &UserContext, range: DateRange) -> Self {
        Self::generate_with_tolerance(store, user, range, Settings::default().balance_tolerance)
    }

    /// As [`FinancialReport::generate`], with an explicit balance-sheet tolerance
    pub fn generate_with_tolerance<S: RecordStore>(
        store: &S,
        user: &UserContext,
        range: DateRange,
        tolerance: Money,
    ) -> Self {
        let income: Table<IncomeRecord> = store.load(user);
        let expenses: Table<ExpenseRecord> = store.load(user);
        let journal: Table<JournalLine> = store.load(user);

        Self::from_records(income.rows(), expenses.rows(), journal.rows(), range, tolerance)
    }

    /// Compute every report from in-memory rows
    pub fn from_records(
        income: &[IncomeRecord],
        expenses: &[ExpenseRecord],
        journal: &[JournalLine],
        range: DateRange,
        tolerance: Money,
    ) -> Self {
        let ledgers = accounts_in(journal, range)
            .iter()
            .map(|account| LedgerReport::generate(journal, account, range))
            .collect();

        Self {
            summary: SummaryReport::generate(income, expenses, range),
            journal: GeneralJournalReport::generate(journal, range),
            ledgers,
            income_statement: IncomeStatement::generate(journal, range),
            balance_sheet: BalanceSheet::generate(journal, range, tolerance),
        }
    }

    /// Format every report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut sections = vec![
            self.summary.format_terminal(),
            self.journal.format_terminal(),
        ];
        sections.extend(self.ledgers.iter().map(LedgerReport::format_terminal));
        sections.push(self.income_statement.format_terminal());
        sections.push(self.balance_sheet.format_terminal());
        sections.join("\n")
    }

    /// Export every report as consecutive CSV sections separated by blank lines
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FarmbookResult<()> {
        self.summary.export_csv(writer)?;
        writeln!(writer).map_err(export_error)?;
        self.journal.export_csv(writer)?;
        for ledger in &self.ledgers {
            writeln!(writer).map_err(export_error)?;
            ledger.export_csv(writer)?;
        }
        writeln!(writer).map_err(export_error)?;
        self.income_statement.export_csv(writer)?;
        writeln!(writer).map_err(export_error)?;
        self.balance_sheet.export_csv(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FarmbookPaths;
    use crate::models::{Account, ExpenseMethod, IncomeMethod};
    use crate::services::TransactionService;
    use crate::storage::CsvRecordStore;
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, CsvRecordStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FarmbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = CsvRecordStore::new(paths).unwrap();
        (temp_dir, store)
    }

    fn at(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
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
    fn test_generate_from_store() {
        let (_temp_dir, store) = create_test_store();
        let user = UserContext::new("siti").unwrap();
        let service = TransactionService::new(&store);

        service
            .record_income(
                at(1, 5),
                "Penjualan Padi",
                Money::from_units(100_000),
                IncomeMethod::Cash,
                "",
                &user,
            )
            .unwrap();
        service
            .record_expense(
                at(1, 6),
                "Pupuk",
                "Urea",
                Money::from_units(50_000),
                ExpenseMethod::Payable,
                "",
                &user,
            )
            .unwrap();
        // Outside the period
        service
            .record_income(
                at(2, 1),
                "Lain-lain",
                Money::from_units(1_000),
                IncomeMethod::Transfer,
                "",
                &user,
            )
            .unwrap();

        let report = FinancialReport::generate(&store, &user, january());

        assert_eq!(report.summary.total_income, Money::from_units(100_000));
        assert_eq!(report.summary.total_expense, Money::from_units(50_000));
        assert_eq!(report.journal.lines.len(), 4);
        assert!(report.journal.is_balanced());
        assert_eq!(report.income_statement.net_income, Money::from_units(50_000));
        assert!(report.balance_sheet.is_balanced());

        let ledger_accounts: Vec<&Account> = report.ledgers.iter().map(|l| &l.account).collect();
        assert_eq!(
            ledger_accounts,
            vec![
                &Account::Cash,
                &Account::Revenue,
                &Account::Expense("Urea".into()),
                &Account::Payable,
            ]
        );
    }

    #[test]
    fn test_reports_are_per_user() {
        let (_temp_dir, store) = create_test_store();
        let siti = UserContext::new("siti").unwrap();
        let budi = UserContext::new("budi").unwrap();

        TransactionService::new(&store)
            .record_income(
                at(1, 5),
                "Penjualan Padi",
                Money::from_units(100),
                IncomeMethod::Cash,
                "",
                &siti,
            )
            .unwrap();

        let report = FinancialReport::generate(&store, &budi, january());
        assert!(report.summary.total_income.is_zero());
        assert!(report.journal.lines.is_empty());
        assert!(report.ledgers.is_empty());
    }

    #[test]
    fn test_export_all_sections() {
        let journal = vec![
            JournalLine::debit(at(1, 2), Account::Cash, Money::from_units(10), ""),
            JournalLine::credit(at(1, 2), Account::Revenue, Money::from_units(10), ""),
        ];
        let report =
            FinancialReport::from_records(&[], &[], &journal, january(), Money::from_units(1));

        let mut csv_output = Vec::new();
        report.export_csv(&mut csv_output).unwrap();

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.contains("Month,Income,Expense"));
        assert!(csv_string.contains("Tanggal,Akun,Debit,Kredit,Keterangan"));
        assert_eq!(csv_string.matches("Account,Date,Note").count(), 2);
        assert!(csv_string.contains("Section,Account,Amount"));
        assert!(csv_string.contains("Section,Item,Amount"));
    }
}
