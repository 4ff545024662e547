//! Transaction service
//!
//! Records incomes and expenses together with their journal lines, and
//! deletes rows from any of the three tables. Input is validated before
//! anything is written.

use std::fmt;

use chrono::NaiveDateTime;
use tracing::info;

use crate::auth::UserContext;
use crate::error::{FarmbookError, FarmbookResult};
use crate::models::{
    Account, ExpenseMethod, ExpenseRecord, IncomeMethod, IncomeRecord, JournalEntry, JournalLine,
    Money, Record,
};
use crate::storage::{RecordStore, Table};

use super::journal::{derive_expense_entry, derive_income_entry};

/// Which transaction table a delete targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A saved record and the journal entry posted for it
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded<R> {
    pub record: R,
    pub entry: JournalEntry,
}

/// A record removed by [`TransactionService::delete_transaction`]
#[derive(Debug, Clone, PartialEq)]
pub enum RemovedTransaction {
    Income(IncomeRecord),
    Expense(ExpenseRecord),
}

impl RemovedTransaction {
    pub fn amount(&self) -> Money {
        match self {
            Self::Income(r) => r.amount,
            Self::Expense(r) => r.amount,
        }
    }

    pub fn date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Income(r) => r.date,
            Self::Expense(r) => r.date,
        }
    }
}

/// Service for recording and deleting transactions
pub struct TransactionService<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> TransactionService<'a, S> {
    /// Create a new transaction service
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Record an income and post its journal entry
    pub fn record_income(
        &self,
        date: NaiveDateTime,
        source: &str,
        amount: Money,
        method: IncomeMethod,
        note: &str,
        user: &UserContext,
    ) -> FarmbookResult<Recorded<IncomeRecord>> {
        let source = source.trim();
        if source.is_empty() {
            return Err(FarmbookError::Validation(
                "Income source must not be empty".into(),
            ));
        }
        require_positive(amount)?;

        let record = IncomeRecord::new(date, source, amount, method, note, user.username());
        let entry = derive_income_entry(date, source, amount, method);

        self.store.append(record.clone(), user)?;
        self.store.append_all(entry.clone().into_lines().to_vec(), user)?;

        info!(
            user = user.username(),
            source,
            amount = %amount,
            method = %method,
            "recorded income"
        );

        Ok(Recorded { record, entry })
    }

    /// Record an expense and post its journal entry
    ///
    /// The subcategory becomes the expense account, so it may not reuse the
    /// name of a fixed account.
    #[allow(clippy::too_many_arguments)]
    pub fn record_expense(
        &self,
        date: NaiveDateTime,
        category: &str,
        subcategory: &str,
        amount: Money,
        method: ExpenseMethod,
        note: &str,
        user: &UserContext,
    ) -> FarmbookResult<Recorded<ExpenseRecord>> {
        let category = category.trim();
        let subcategory = subcategory.trim();
        if category.is_empty() {
            return Err(FarmbookError::Validation(
                "Expense category must not be empty".into(),
            ));
        }
        if subcategory.is_empty() {
            return Err(FarmbookError::Validation(
                "Expense subcategory must not be empty".into(),
            ));
        }
        if Account::is_reserved_name(subcategory) {
            return Err(FarmbookError::Validation(format!(
                "'{}' is an account name and cannot be used as a subcategory",
                subcategory
            )));
        }
        require_positive(amount)?;

        let record = ExpenseRecord::new(
            date,
            category,
            subcategory,
            amount,
            method,
            note,
            user.username(),
        );
        let entry = derive_expense_entry(date, subcategory, amount, method, note);

        self.store.append(record.clone(), user)?;
        self.store.append_all(entry.clone().into_lines().to_vec(), user)?;

        info!(
            user = user.username(),
            category,
            subcategory,
            amount = %amount,
            method = %method,
            "recorded expense"
        );

        Ok(Recorded { record, entry })
    }

    /// Delete one income or expense row
    ///
    /// Journal lines posted for the record are left in place.
    pub fn delete_transaction(
        &self,
        kind: TransactionKind,
        row: usize,
        user: &UserContext,
    ) -> FarmbookResult<RemovedTransaction> {
        match kind {
            TransactionKind::Income => self.delete_row(row, user).map(RemovedTransaction::Income),
            TransactionKind::Expense => {
                self.delete_row(row, user).map(RemovedTransaction::Expense)
            }
        }
    }

    /// Delete one journal line
    pub fn delete_journal_line(&self, row: usize, user: &UserContext) -> FarmbookResult<JournalLine> {
        self.delete_row(row, user)
    }

    /// Income rows with their row numbers
    pub fn list_income(&self, user: &UserContext) -> Vec<(usize, IncomeRecord)> {
        indexed(self.store.load(user))
    }

    /// Expense rows with their row numbers
    pub fn list_expenses(&self, user: &UserContext) -> Vec<(usize, ExpenseRecord)> {
        indexed(self.store.load(user))
    }

    /// Journal lines with their row numbers
    pub fn list_journal(&self, user: &UserContext) -> Vec<(usize, JournalLine)> {
        indexed(self.store.load(user))
    }

    fn delete_row<R: Record>(&self, row: usize, user: &UserContext) -> FarmbookResult<R> {
        let mut table: Table<R> = self.store.load(user);
        let removed = table
            .remove(row)
            .ok_or_else(|| FarmbookError::row_not_found(R::KIND.entity_name(), row))?;
        self.store.save(&table, user)?;

        let kind = R::KIND;
        info!(user = user.username(), kind = %kind, row, "deleted row");
        Ok(removed)
    }
}

fn require_positive(amount: Money) -> FarmbookResult<()> {
    if !amount.is_positive() {
        return Err(FarmbookError::Validation(format!(
            "Amount must be greater than zero, got {}",
            amount
        )));
    }
    if !amount.is_within_limit() {
        return Err(FarmbookError::Validation(format!(
            "Amount must not exceed {}, got {}",
            Money::max_amount(),
            amount
        )));
    }
    Ok(())
}

fn indexed<R: Record>(table: Table<R>) -> Vec<(usize, R)> {
    table.into_rows().into_iter().enumerate().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FarmbookPaths;
    use crate::storage::CsvRecordStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, CsvRecordStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FarmbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = CsvRecordStore::new(paths).unwrap();
        (temp_dir, store)
    }

    fn siti() -> UserContext {
        UserContext::new("siti").unwrap()
    }

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_record_income() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);
        let user = siti();

        let recorded = service
            .record_income(
                date(),
                "Penjualan Padi",
                Money::from_units(100_000),
                IncomeMethod::Cash,
                "panen pertama",
                &user,
            )
            .unwrap();
        assert_eq!(recorded.record.owner, "siti");

        let income = service.list_income(&user);
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].0, 0);
        assert_eq!(income[0].1.amount, Money::from_units(100_000));

        let journal: Vec<JournalLine> =
            service.list_journal(&user).into_iter().map(|(_, l)| l).collect();
        assert_eq!(journal.len(), 2);
        assert_eq!(journal[0].account, Account::Cash);
        assert_eq!(journal[0].debit, Money::from_units(100_000));
        assert_eq!(journal[1].account, Account::Revenue);
        assert_eq!(journal[1].credit, Money::from_units(100_000));
        assert_eq!(journal[1].note, "Penjualan Padi");
    }

    #[test]
    fn test_record_expense() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);
        let user = siti();

        service
            .record_expense(
                date(),
                "Pupuk",
                "Urea",
                Money::from_units(50_000),
                ExpenseMethod::Payable,
                "karung 50kg",
                &user,
            )
            .unwrap();

        let journal = service.list_journal(&user);
        assert_eq!(journal[0].1.account, Account::Expense("Urea".into()));
        assert_eq!(journal[0].1.debit, Money::from_units(50_000));
        assert_eq!(journal[1].1.account, Account::Payable);
        assert_eq!(journal[1].1.credit, Money::from_units(50_000));
        assert_eq!(journal[1].1.note, "karung 50kg");
    }

    #[test]
    fn test_invalid_input_writes_nothing() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);
        let user = siti();

        let zero = service.record_income(
            date(),
            "Penjualan Padi",
            Money::zero(),
            IncomeMethod::Cash,
            "",
            &user,
        );
        assert!(zero.unwrap_err().is_validation());

        let negative = service.record_expense(
            date(),
            "Pupuk",
            "Urea",
            Money::from_units(-5),
            ExpenseMethod::Cash,
            "",
            &user,
        );
        assert!(negative.unwrap_err().is_validation());

        let no_source = service.record_income(
            date(),
            "   ",
            Money::from_units(10),
            IncomeMethod::Cash,
            "",
            &user,
        );
        assert!(no_source.unwrap_err().is_validation());

        let reserved = service.record_expense(
            date(),
            "Lainnya",
            "Kas",
            Money::from_units(10),
            ExpenseMethod::Cash,
            "",
            &user,
        );
        assert!(reserved.unwrap_err().is_validation());

        let too_large = service.record_income(
            date(),
            "Penjualan Padi",
            Money::max_amount() + Money::from_cents(1),
            IncomeMethod::Cash,
            "",
            &user,
        );
        assert!(too_large.unwrap_err().is_validation());

        assert!(service.list_income(&user).is_empty());
        assert!(service.list_expenses(&user).is_empty());
        assert!(service.list_journal(&user).is_empty());
    }

    #[test]
    fn test_delete_on_empty_table_is_not_found() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);

        let err = service
            .delete_transaction(TransactionKind::Income, 0, &siti())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_out_of_range_is_not_found() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);
        let user = siti();

        service
            .record_expense(
                date(),
                "Bibit",
                "Benih Padi",
                Money::from_units(30_000),
                ExpenseMethod::Cash,
                "",
                &user,
            )
            .unwrap();

        let err = service
            .delete_transaction(TransactionKind::Expense, 1, &user)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.list_expenses(&user).len(), 1);
    }

    #[test]
    fn test_delete_leaves_journal_alone() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);
        let user = siti();

        for amount in [100, 200] {
            service
                .record_income(
                    date(),
                    "Penjualan Padi",
                    Money::from_units(amount),
                    IncomeMethod::Transfer,
                    "",
                    &user,
                )
                .unwrap();
        }

        let removed = service
            .delete_transaction(TransactionKind::Income, 0, &user)
            .unwrap();
        assert_eq!(removed.amount(), Money::from_units(100));

        let remaining = service.list_income(&user);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].1.amount, Money::from_units(200));
        assert_eq!(service.list_journal(&user).len(), 4);
    }

    #[test]
    fn test_delete_journal_line() {
        let (_temp_dir, store) = create_test_store();
        let service = TransactionService::new(&store);
        let user = siti();

        service
            .record_income(
                date(),
                "Penjualan Padi",
                Money::from_units(100),
                IncomeMethod::Cash,
                "",
                &user,
            )
            .unwrap();

        let removed = service.delete_journal_line(1, &user).unwrap();
        assert_eq!(removed.account, Account::Revenue);
        assert_eq!(service.list_journal(&user).len(), 1);
        assert!(service.delete_journal_line(1, &user).unwrap_err().is_not_found());
    }
}
