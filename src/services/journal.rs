//! Double-entry derivation
//!
//! Maps a recorded income or expense onto the two journal lines it posts.
//! Everything here is pure; persisting the lines is the transaction
//! service's job.

use chrono::NaiveDateTime;

use crate::models::{Account, ExpenseMethod, IncomeMethod, JournalEntry, JournalLine, Money};

/// Build the balanced pair debiting `debit_account` and crediting `credit_account`
pub fn derive_journal(
    date: NaiveDateTime,
    debit_account: Account,
    credit_account: Account,
    amount: Money,
    note: &str,
) -> JournalEntry {
    JournalEntry {
        debit: JournalLine::debit(date, debit_account, amount, note),
        credit: JournalLine::credit(date, credit_account, amount, note),
    }
}

/// Accounts posted by an income, as `(debit, credit)`
pub fn income_accounts(method: IncomeMethod) -> (Account, Account) {
    match method {
        IncomeMethod::Cash => (Account::Cash, Account::Revenue),
        IncomeMethod::Transfer => (Account::Bank, Account::Revenue),
        IncomeMethod::Receivable => (Account::Receivable, Account::Revenue),
        // Settling a receivable moves it into cash; no new revenue
        IncomeMethod::ReceivablePayment => (Account::Cash, Account::Receivable),
    }
}

/// Accounts posted by an expense, as `(debit, credit)`
pub fn expense_accounts(method: ExpenseMethod, subcategory: &str) -> (Account, Account) {
    let expense = Account::Expense(subcategory.trim().to_string());
    match method {
        ExpenseMethod::Cash => (expense, Account::Cash),
        ExpenseMethod::Transfer => (expense, Account::Bank),
        ExpenseMethod::Payable => (expense, Account::Payable),
        ExpenseMethod::PayablePayment => (Account::Payable, Account::Cash),
    }
}

/// Journal entry for an income; the note is the income source
pub fn derive_income_entry(
    date: NaiveDateTime,
    source: &str,
    amount: Money,
    method: IncomeMethod,
) -> JournalEntry {
    let (debit, credit) = income_accounts(method);
    derive_journal(date, debit, credit, amount, source)
}

/// Journal entry for an expense; the note is the expense note
pub fn derive_expense_entry(
    date: NaiveDateTime,
    subcategory: &str,
    amount: Money,
    method: ExpenseMethod,
    note: &str,
) -> JournalEntry {
    let (debit, credit) = expense_accounts(method, subcategory);
    derive_journal(date, debit, credit, amount, note)
}
