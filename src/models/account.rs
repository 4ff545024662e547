//! Account model
//!
//! Journal lines post to one of five fixed accounts or to an expense account
//! named after the expense subcategory. Accounts are persisted by their
//! Indonesian names (`Kas`, `Piutang Dagang`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// An account a journal line posts to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Account {
    /// Cash on hand ("Kas")
    Cash,
    /// Bank balance ("Bank")
    Bank,
    /// Accounts receivable ("Piutang Dagang")
    Receivable,
    /// Accounts payable ("Utang Dagang")
    Payable,
    /// Revenue ("Pendapatan")
    Revenue,
    /// Expense account named after an expense subcategory
    Expense(String),
}

impl Account {
    /// Names of the five fixed accounts, in balance-sheet order
    pub const FIXED_NAMES: [&'static str; 5] =
        ["Kas", "Bank", "Piutang Dagang", "Utang Dagang", "Pendapatan"];

    /// Parse an account from its persisted name
    ///
    /// Any name outside the fixed set is an expense account.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "Kas" => Self::Cash,
            "Bank" => Self::Bank,
            "Piutang Dagang" => Self::Receivable,
            "Utang Dagang" => Self::Payable,
            "Pendapatan" => Self::Revenue,
            other => Self::Expense(other.to_string()),
        }
    }

    /// The persisted account name
    pub fn name(&self) -> &str {
        match self {
            Self::Cash => "Kas",
            Self::Bank => "Bank",
            Self::Receivable => "Piutang Dagang",
            Self::Payable => "Utang Dagang",
            Self::Revenue => "Pendapatan",
            Self::Expense(name) => name,
        }
    }

    /// Returns true if `name` would parse to one of the fixed accounts
    pub fn is_reserved_name(name: &str) -> bool {
        !matches!(Self::from_name(name), Self::Expense(_))
    }

    /// Returns true for asset accounts (cash, bank, receivable)
    pub fn is_asset(&self) -> bool {
        matches!(self, Self::Cash | Self::Bank | Self::Receivable)
    }

    /// Returns true for expense accounts
    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense(_))
    }
}

impl From<String> for Account {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Account> for String {
    fn from(account: Account) -> Self {
        match account {
            Account::Expense(name) => name,
            fixed => fixed.name().to_string(),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
