//! Farmbook - double-entry bookkeeping for small farms
//!
//! This library records a farmer's incomes and expenses, derives the
//! balanced journal entries each one posts, and builds the period reports:
//! summary, general journal, ledgers, income statement and balance sheet.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and logging setup
//! - `error`: Custom error types
//! - `models`: Records, journal lines, accounts and money
//! - `storage`: Per-user CSV tables and the credentials table
//! - `auth`: Registration, login and the request-scoped user
//! - `services`: Journal derivation and transaction recording
//! - `reports`: Period reports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `farmbook` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use farmbook::auth::UserContext;
//! use farmbook::config::FarmbookPaths;
//! use farmbook::models::{IncomeMethod, Money};
//! use farmbook::services::TransactionService;
//! use farmbook::storage::CsvRecordStore;
//!
//! let store = CsvRecordStore::new(FarmbookPaths::new()?)?;
//! let user = UserContext::new("siti")?;
//! TransactionService::new(&store).record_income(
//!     date, "Penjualan Padi", Money::from_units(100_000), IncomeMethod::Cash, "", &user,
//! )?;
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FarmbookError, FarmbookResult};
