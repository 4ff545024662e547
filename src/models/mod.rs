//! Core data models for Farmbook
//!
//! Income and expense records, the journal lines derived from them, the
//! accounts they post to, and the money type they are measured in.

pub mod account;
pub mod expense;
pub mod income;
pub mod journal;
pub mod money;
pub mod record;

pub use account::Account;
pub use expense::{ExpenseMethod, ExpenseRecord};
pub use income::{IncomeMethod, IncomeRecord};
pub use journal::{JournalEntry, JournalLine};
pub use money::Money;
pub use record::{parse_record_date, Record, RecordKind, RECORD_DATE_FORMAT};
