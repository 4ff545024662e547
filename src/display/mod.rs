//! Display formatting for terminal output
//!
//! Provides utilities for formatting records and settings for terminal
//! display. Reports format themselves.

pub mod records;
pub mod settings;

pub use records::{format_expense_list, format_income_list, format_journal_line, format_journal_list};
pub use settings::{format_category_tree, format_config};
