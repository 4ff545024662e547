//! Service layer for Farmbook
//!
//! The service layer provides bookkeeping logic on top of the storage layer:
//! input validation and deriving the journal entries each transaction posts.

pub mod journal;
pub mod transaction;

pub use journal::{
    derive_expense_entry, derive_income_entry, derive_journal, expense_accounts, income_accounts,
};
pub use transaction::{Recorded, RemovedTransaction, TransactionKind, TransactionService};
