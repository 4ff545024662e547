//! Record table formatting
//!
//! Renders income, expense and journal rows as terminal tables. The `#`
//! column is the row number the delete commands take.

use chrono::NaiveDateTime;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{ExpenseRecord, IncomeRecord, JournalLine};

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Subcategory")]
    subcategory: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct JournalRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Debit")]
    debit: String,
    #[tabled(rename = "Credit")]
    credit: String,
    #[tabled(rename = "Note")]
    note: String,
}

fn format_date(date: Option<NaiveDateTime>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format income rows as a table
pub fn format_income_list(rows: &[(usize, IncomeRecord)]) -> String {
    if rows.is_empty() {
        return "No income recorded.\n".to_string();
    }

    render(
        rows.iter()
            .map(|(row, r)| IncomeRow {
                row: *row,
                date: format_date(r.date),
                source: r.source.clone(),
                amount: r.amount.to_string(),
                method: r.method.to_string(),
                note: r.note.clone(),
            })
            .collect(),
    )
}

/// Format expense rows as a table
pub fn format_expense_list(rows: &[(usize, ExpenseRecord)]) -> String {
    if rows.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    render(
        rows.iter()
            .map(|(row, r)| ExpenseRow {
                row: *row,
                date: format_date(r.date),
                category: r.category.clone(),
                subcategory: r.subcategory.clone(),
                amount: r.amount.to_string(),
                method: r.method.to_string(),
                note: r.note.clone(),
            })
            .collect(),
    )
}

/// Format journal lines as a table
pub fn format_journal_list(rows: &[(usize, JournalLine)]) -> String {
    if rows.is_empty() {
        return "No journal entries.\n".to_string();
    }

    render(
        rows.iter()
            .map(|(row, line)| JournalRow {
                row: *row,
                date: format_date(line.date),
                account: line.account.to_string(),
                debit: line.debit.to_string(),
                credit: line.credit.to_string(),
                note: line.note.clone(),
            })
            .collect(),
    )
}

/// One-line description of a journal line
pub fn format_journal_line(line: &JournalLine) -> String {
    format!(
        "{} {} debit {} credit {}",
        format_date(line.date),
        line.account,
        line.debit,
        line.credit
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, ExpenseMethod, IncomeMethod, Money};
    use chrono::NaiveDate;

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_income_list(&[]), "No income recorded.\n");
        assert_eq!(format_expense_list(&[]), "No expenses recorded.\n");
        assert_eq!(format_journal_list(&[]), "No journal entries.\n");
    }

    #[test]
    fn test_income_list() {
        let record = IncomeRecord::new(
            date(),
            "Penjualan Padi",
            Money::from_units(100_000),
            IncomeMethod::Receivable,
            "",
            "siti",
        );

        let output = format_income_list(&[(3, record)]);
        assert!(output.contains("Source"));
        assert!(output.contains("2025-01-15"));
        assert!(output.contains("Rp 100,000"));
        assert!(output.contains("Piutang"));
        assert!(output.contains(" 3 "));
    }

    #[test]
    fn test_expense_list() {
        let record = ExpenseRecord::new(
            date(),
            "Pupuk",
            "Urea",
            Money::from_units(50_000),
            ExpenseMethod::PayablePayment,
            "",
            "siti",
        );

        let output = format_expense_list(&[(0, record)]);
        assert!(output.contains("Subcategory"));
        assert!(output.contains("Urea"));
        assert!(output.contains("Pelunasan Utang"));
    }

    #[test]
    fn test_journal_list_with_missing_date() {
        let mut line = JournalLine::debit(date(), Account::Cash, Money::from_units(5), "x");
        line.date = None;

        let output = format_journal_list(&[(0, line.clone())]);
        assert!(output.contains("Kas"));
        assert!(format_journal_line(&line).starts_with("- Kas"));
    }
}
