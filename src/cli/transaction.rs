//! Transaction CLI commands
//!
//! Implements the income, expense and journal commands on top of
//! [`TransactionService`].

use chrono::{Local, NaiveDateTime};
use clap::Subcommand;

use crate::auth::UserContext;
use crate::config::settings::Settings;
use crate::display::{format_expense_list, format_income_list, format_journal_line, format_journal_list};
use crate::error::{FarmbookError, FarmbookResult};
use crate::models::{parse_record_date, ExpenseMethod, IncomeMethod, Money};
use crate::services::{RemovedTransaction, TransactionKind, TransactionService};
use crate::storage::RecordStore;

/// Income subcommands
#[derive(Subcommand, Debug)]
pub enum IncomeCommands {
    /// Record an income
    Add {
        /// Amount received (e.g., "100000" or "2500.50")
        amount: String,

        /// Where the money came from (defaults to the first configured source)
        #[arg(short, long)]
        source: Option<String>,

        /// Tunai, Transfer, Piutang or "Pelunasan Piutang"
        #[arg(short, long, default_value = "Tunai")]
        method: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// List recorded income
    List,

    /// Delete an income row (journal lines are kept)
    Delete {
        /// Row number as shown by `income list`
        row: usize,
    },
}

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount paid (e.g., "50000")
        amount: String,

        /// Subcategory, which is also the expense account (e.g., "Urea")
        #[arg(short, long)]
        subcategory: String,

        /// Category; looked up from the catalog when omitted
        #[arg(short, long)]
        category: Option<String>,

        /// Tunai, Transfer, Utang or "Pelunasan Utang"
        #[arg(short, long, default_value = "Tunai")]
        method: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// List recorded expenses
    List,

    /// Delete an expense row (journal lines are kept)
    Delete {
        /// Row number as shown by `expense list`
        row: usize,
    },
}

/// Journal subcommands
#[derive(Subcommand, Debug)]
pub enum JournalCommands {
    /// List journal lines
    List,

    /// Delete a single journal line
    Delete {
        /// Row number as shown by `journal list`
        row: usize,
    },
}

fn parse_amount(amount: &str) -> FarmbookResult<Money> {
    Money::parse(amount).map_err(|e| FarmbookError::Validation(format!("Invalid amount: {}", e)))
}

fn parse_date(date: Option<&str>) -> FarmbookResult<NaiveDateTime> {
    match date {
        Some(raw) => parse_record_date(raw).ok_or_else(|| {
            FarmbookError::Validation(format!("Invalid date: {}. Use YYYY-MM-DD", raw))
        }),
        None => Ok(Local::now().date_naive().and_time(chrono::NaiveTime::MIN)),
    }
}

fn print_orphan_warning(removed: &RemovedTransaction) {
    let date = removed
        .date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "Note: the journal lines for this transaction ({} on {}) were kept. \
         Use 'farmbook journal delete' to remove them.",
        removed.amount(),
        date
    );
}

/// Handle an income command
pub fn handle_income_command<S: RecordStore>(
    store: &S,
    settings: &Settings,
    user: &UserContext,
    cmd: IncomeCommands,
) -> FarmbookResult<()> {
    let service = TransactionService::new(store);

    match cmd {
        IncomeCommands::Add {
            amount,
            source,
            method,
            date,
            note,
        } => {
            let amount = parse_amount(&amount)?;
            let method: IncomeMethod = method.parse().map_err(FarmbookError::Validation)?;
            let date = parse_date(date.as_deref())?;
            let source = source
                .or_else(|| settings.income_sources.first().cloned())
                .unwrap_or_default();

            let recorded = service.record_income(date, &source, amount, method, &note, user)?;

            println!(
                "Recorded income: {} from {} ({})",
                recorded.record.amount, recorded.record.source, recorded.record.method
            );
            println!("  Debit  {}", recorded.entry.debit.account);
            println!("  Credit {}", recorded.entry.credit.account);
        }

        IncomeCommands::List => {
            print!("{}", format_income_list(&service.list_income(user)));
        }

        IncomeCommands::Delete { row } => {
            let removed = service.delete_transaction(TransactionKind::Income, row, user)?;
            println!("Deleted income row {}.", row);
            print_orphan_warning(&removed);
        }
    }

    Ok(())
}

/// Handle an expense command
pub fn handle_expense_command<S: RecordStore>(
    store: &S,
    settings: &Settings,
    user: &UserContext,
    cmd: ExpenseCommands,
) -> FarmbookResult<()> {
    let service = TransactionService::new(store);

    match cmd {
        ExpenseCommands::Add {
            amount,
            subcategory,
            category,
            method,
            date,
            note,
        } => {
            let amount = parse_amount(&amount)?;
            let method: ExpenseMethod = method.parse().map_err(FarmbookError::Validation)?;
            let date = parse_date(date.as_deref())?;
            let category = match category {
                Some(category) => category,
                None => settings
                    .category_of(subcategory.trim())
                    .map(|c| c.name.clone())
                    .ok_or_else(|| {
                        FarmbookError::Validation(format!(
                            "Unknown subcategory '{}'; pass --category",
                            subcategory
                        ))
                    })?,
            };

            let recorded = service.record_expense(
                date,
                &category,
                &subcategory,
                amount,
                method,
                &note,
                user,
            )?;

            println!(
                "Recorded expense: {} for {} / {} ({})",
                recorded.record.amount,
                recorded.record.category,
                recorded.record.subcategory,
                recorded.record.method
            );
            println!("  Debit  {}", recorded.entry.debit.account);
            println!("  Credit {}", recorded.entry.credit.account);
        }

        ExpenseCommands::List => {
            print!("{}", format_expense_list(&service.list_expenses(user)));
        }

        ExpenseCommands::Delete { row } => {
            let removed = service.delete_transaction(TransactionKind::Expense, row, user)?;
            println!("Deleted expense row {}.", row);
            print_orphan_warning(&removed);
        }
    }

    Ok(())
}

/// Handle a journal command
pub fn handle_journal_command<S: RecordStore>(
    store: &S,
    user: &UserContext,
    cmd: JournalCommands,
) -> FarmbookResult<()> {
    let service = TransactionService::new(store);

    match cmd {
        JournalCommands::List => {
            print!("{}", format_journal_list(&service.list_journal(user)));
        }
        JournalCommands::Delete { row } => {
            let removed = service.delete_journal_line(row, user)?;
            println!("Deleted journal line {}: {}", row, format_journal_line(&removed));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100000").unwrap(), Money::from_units(100_000));
        assert!(parse_amount("seratus").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        let parsed = parse_date(Some("2025-01-05")).unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2025, 1, 5)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert!(parse_date(Some("05/01/2025")).unwrap_err().is_validation());
        assert_eq!(parse_date(None).unwrap().time(), chrono::NaiveTime::MIN);
    }
}
