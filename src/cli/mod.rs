//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod report;
pub mod transaction;

pub use auth::{handle_register_command, login, PASSWORD_ENV};
pub use report::{handle_report_command, ReportCommands, ReportOptions};
pub use transaction::{
    handle_expense_command, handle_income_command, handle_journal_command, ExpenseCommands,
    IncomeCommands, JournalCommands,
};
