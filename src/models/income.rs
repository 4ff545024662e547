//! Income record model
//!
//! One row of the per-user income table (`pemasukan_<user>.csv`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::record::{record_date, Record, RecordKind};

/// How an income was received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeMethod {
    /// Paid in cash
    #[serde(rename = "Tunai")]
    Cash,
    /// Paid into the bank account
    #[serde(rename = "Transfer")]
    Transfer,
    /// Sold on credit; the buyer owes us
    #[serde(rename = "Piutang")]
    Receivable,
    /// A buyer settling an earlier credit sale
    #[serde(rename = "Pelunasan Piutang")]
    ReceivablePayment,
}

impl IncomeMethod {
    /// All methods, in the order offered to the user
    pub const ALL: [IncomeMethod; 4] = [
        Self::Cash,
        Self::Transfer,
        Self::Receivable,
        Self::ReceivablePayment,
    ];

    /// The persisted label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Tunai",
            Self::Transfer => "Transfer",
            Self::Receivable => "Piutang",
            Self::ReceivablePayment => "Pelunasan Piutang",
        }
    }
}

impl fmt::Display for IncomeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for IncomeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tunai" | "cash" => Ok(Self::Cash),
            "transfer" | "bank" => Ok(Self::Transfer),
            "piutang" | "receivable" | "credit" => Ok(Self::Receivable),
            "pelunasan piutang" | "pelunasan-piutang" | "receivable-payment"
            | "receivable_payment" => Ok(Self::ReceivablePayment),
            other => Err(format!(
                "Unknown income method '{}'. Use one of: Tunai, Transfer, Piutang, Pelunasan Piutang",
                other
            )),
        }
    }
}

/// A recorded income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    #[serde(rename = "Tanggal", with = "record_date")]
    pub date: Option<NaiveDateTime>,

    /// Where the money came from (e.g. "Penjualan Padi")
    #[serde(rename = "Sumber")]
    pub source: String,

    #[serde(rename = "Jumlah")]
    pub amount: Money,

    #[serde(rename = "Metode")]
    pub method: IncomeMethod,

    #[serde(rename = "Keterangan", default)]
    pub note: String,

    /// Username of the owner
    #[serde(rename = "Username")]
    pub owner: String,
}

impl IncomeRecord {
    /// Create a new income record
    pub fn new(
        date: NaiveDateTime,
        source: impl Into<String>,
        amount: Money,
        method: IncomeMethod,
        note: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            date: Some(date),
            source: source.into(),
            amount,
            method,
            note: note.into(),
            owner: owner.into(),
        }
    }
}

impl Record for IncomeRecord {
    const KIND: RecordKind = RecordKind::Income;

    fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }
}
