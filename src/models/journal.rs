//! Journal line model
//!
//! One row of the per-user general journal (`jurnal_<user>.csv`). A
//! transaction always contributes a debit line and a credit line of equal
//! amount, grouped here as a [`JournalEntry`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::account::Account;
use super::money::Money;
use super::record::{record_date, Record, RecordKind};

/// A single posting to an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    #[serde(rename = "Tanggal", with = "record_date")]
    pub date: Option<NaiveDateTime>,

    #[serde(rename = "Akun")]
    pub account: Account,

    #[serde(rename = "Debit")]
    pub debit: Money,

    #[serde(rename = "Kredit")]
    pub credit: Money,

    #[serde(rename = "Keterangan", default)]
    pub note: String,
}

impl JournalLine {
    /// A line debiting `account`
    pub fn debit(date: NaiveDateTime, account: Account, amount: Money, note: &str) -> Self {
        Self {
            date: Some(date),
            account,
            debit: amount,
            credit: Money::zero(),
            note: note.to_string(),
        }
    }

    /// A line crediting `account`
    pub fn credit(date: NaiveDateTime, account: Account, amount: Money, note: &str) -> Self {
        Self {
            date: Some(date),
            account,
            debit: Money::zero(),
            credit: amount,
            note: note.to_string(),
        }
    }

    /// Debit minus credit for this line
    pub fn balance(&self) -> Money {
        self.debit - self.credit
    }
}

impl Record for JournalLine {
    const KIND: RecordKind = RecordKind::Journal;

    fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }
}

/// The balanced debit/credit pair produced for one transaction
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub debit: JournalLine,
    pub credit: JournalLine,
}

impl JournalEntry {
    /// Total of the debit column
    pub fn debit_total(&self) -> Money {
        self.debit.debit + self.credit.debit
    }

    /// Total of the credit column
    pub fn credit_total(&self) -> Money {
        self.debit.credit + self.credit.credit
    }

    /// Whether debits equal credits
    pub fn is_balanced(&self) -> bool {
        self.debit_total() == self.credit_total()
    }

    /// The two lines, debit first
    pub fn lines(&self) -> [&JournalLine; 2] {
        [&self.debit, &self.credit]
    }

    /// Consume the entry into its two lines, debit first
    pub fn into_lines(self) -> [JournalLine; 2] {
        [self.debit, self.credit]
    }
}
