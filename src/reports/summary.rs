//! Financial Summary Report
//!
//! Income and expense totals for a period, the resulting net, and a
//! month-by-month breakdown.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::FarmbookResult;
use crate::models::{ExpenseRecord, IncomeRecord, Money};

use super::{export_error, DateRange};

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotals {
    /// Month as `YYYY-MM`
    pub month: String,
    pub income: Money,
    pub expense: Money,
}

/// Financial Summary Report
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub range: DateRange,
    pub total_income: Money,
    pub total_expense: Money,
    /// Income minus expense
    pub net: Money,
    /// Net as a percentage of income, 0 when there is no income
    pub percentage: f64,
    /// Months with activity, oldest first
    pub monthly: Vec<MonthlyTotals>,
}

impl SummaryReport {
    /// Summarize the records dated within `range`
    pub fn generate(income: &[IncomeRecord], expenses: &[ExpenseRecord], range: DateRange) -> Self {
        let income = range.filter(income);
        let expenses = range.filter(expenses);

        let total_income: Money = income.iter().map(|r| r.amount).sum();
        let total_expense: Money = expenses.iter().map(|r| r.amount).sum();
        let net = total_income - total_expense;
        let percentage = if total_income.is_positive() {
            net.as_f64() / total_income.as_f64() * 100.0
        } else {
            0.0
        };

        let mut months: BTreeMap<String, (Money, Money)> = BTreeMap::new();
        for record in &income {
            if let Some(date) = record.date {
                months.entry(date.format("%Y-%m").to_string()).or_default().0 += record.amount;
            }
        }
        for record in &expenses {
            if let Some(date) = record.date {
                months.entry(date.format("%Y-%m").to_string()).or_default().1 += record.amount;
            }
        }

        let monthly = months
            .into_iter()
            .map(|(month, (income, expense))| MonthlyTotals {
                month,
                income,
                expense,
            })
            .collect();

        Self {
            range,
            total_income,
            total_expense,
            net,
            percentage,
            monthly,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Financial Summary ({})\n", self.range));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        output.push_str(&format!("Total Income:   {:>20}\n", self.total_income));
        output.push_str(&format!("Total Expenses: {:>20}\n", self.total_expense));
        output.push_str(&"-".repeat(37));
        output.push('\n');
        output.push_str(&format!(
            "Net:            {:>20} ({:.1}%)\n",
            self.net, self.percentage
        ));

        if !self.monthly.is_empty() {
            output.push('\n');
            output.push_str(&format!(
                "{:<10} {:>18} {:>18}\n",
                "Month", "Income", "Expenses"
            ));
            output.push_str(&"-".repeat(50));
            output.push('\n');
            for month in &self.monthly {
                output.push_str(&format!(
                    "{:<10} {:>18} {:>18}\n",
                    month.month, month.income, month.expense
                ));
            }
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FarmbookResult<()> {
        let mut out = csv::Writer::from_writer(writer);

        out.write_record(["Month", "Income", "Expense"])
            .map_err(export_error)?;
        for month in &self.monthly {
            out.write_record([
                month.month.clone(),
                month.income.to_plain_string(),
                month.expense.to_plain_string(),
            ])
            .map_err(export_error)?;
        }
        out.write_record([
            "TOTAL".to_string(),
            self.total_income.to_plain_string(),
            self.total_expense.to_plain_string(),
        ])
        .map_err(export_error)?;
        out.write_record(["NET".to_string(), self.net.to_plain_string(), String::new()])
            .map_err(export_error)?;

        out.flush().map_err(export_error)?;
        Ok(())
    }
}
