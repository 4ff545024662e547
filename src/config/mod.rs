//! Configuration module for Farmbook
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence
//! - Logging setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::FarmbookPaths;
pub use settings::{ExpenseCategory, Settings};
