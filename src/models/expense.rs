//! Expense record model
//!
//! One row of the per-user expense table (`pengeluaran_<user>.csv`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::record::{record_date, Record, RecordKind};

/// How an expense was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseMethod {
    /// Paid in cash
    #[serde(rename = "Tunai")]
    Cash,
    /// Paid from the bank account
    #[serde(rename = "Transfer")]
    Transfer,
    /// Bought on credit; we owe the supplier
    #[serde(rename = "Utang")]
    Payable,
    /// Settling an earlier credit purchase
    #[serde(rename = "Pelunasan Utang")]
    PayablePayment,
}

impl ExpenseMethod {
    /// All methods, in the order offered to the user
    pub const ALL: [ExpenseMethod; 4] = [
        Self::Cash,
        Self::Transfer,
        Self::Payable,
        Self::PayablePayment,
    ];

    /// The persisted label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Tunai",
            Self::Transfer => "Transfer",
            Self::Payable => "Utang",
            Self::PayablePayment => "Pelunasan Utang",
        }
    }
}

impl fmt::Display for ExpenseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ExpenseMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tunai" | "cash" => Ok(Self::Cash),
            "transfer" | "bank" => Ok(Self::Transfer),
            "utang" | "payable" | "credit" => Ok(Self::Payable),
            "pelunasan utang" | "pelunasan-utang" | "payable-payment" | "payable_payment" => {
                Ok(Self::PayablePayment)
            }
            other => Err(format!(
                "Unknown expense method '{}'. Use one of: Tunai, Transfer, Utang, Pelunasan Utang",
                other
            )),
        }
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(rename = "Tanggal", with = "record_date")]
    pub date: Option<NaiveDateTime>,

    /// Main category (e.g. "Pupuk")
    #[serde(rename = "Kategori")]
    pub category: String,

    /// Subcategory (e.g. "Urea"); doubles as the expense account name
    #[serde(rename = "Sub Kategori")]
    pub subcategory: String,

    #[serde(rename = "Jumlah")]
    pub amount: Money,

    #[serde(rename = "Keterangan", default)]
    pub note: String,

    #[serde(rename = "Metode")]
    pub method: ExpenseMethod,

    /// Username of the owner
    #[serde(rename = "Username")]
    pub owner: String,
}

impl ExpenseRecord {
    /// Create a new expense record
    pub fn new(
        date: NaiveDateTime,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        amount: Money,
        method: ExpenseMethod,
        note: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            date: Some(date),
            category: category.into(),
            subcategory: subcategory.into(),
            amount,
            note: note.into(),
            method,
            owner: owner.into(),
        }
    }
}

impl Record for ExpenseRecord {
    const KIND: RecordKind = RecordKind::Expense;

    fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }
}
