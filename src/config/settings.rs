//! User settings for Farmbook
//!
//! Manages display preferences, the balance-sheet tolerance, and the catalog
//! of income sources and expense categories offered when recording
//! transactions.

use serde::{Deserialize, Serialize};

use super::paths::FarmbookPaths;
use crate::error::FarmbookError;
use crate::models::Money;

/// An expense category and its subcategories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub name: String,
    pub subcategories: Vec<String>,
}

impl ExpenseCategory {
    fn new(name: &str, subcategories: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// User settings for Farmbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Largest gap between assets and liabilities + equity still considered balanced
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Money,

    /// Income sources offered when recording income
    #[serde(default = "default_income_sources")]
    pub income_sources: Vec<String>,

    /// Expense categories offered when recording expenses
    #[serde(default = "default_expense_categories")]
    pub expense_categories: Vec<ExpenseCategory>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_balance_tolerance() -> Money {
    Money::from_units(1)
}

fn default_income_sources() -> Vec<String> {
    vec!["Penjualan Padi".to_string(), "Lain-lain".to_string()]
}

fn default_expense_categories() -> Vec<ExpenseCategory> {
    vec![
        ExpenseCategory::new("Bibit", &["Intani", "Inpari", "Ciherang", "32"]),
        ExpenseCategory::new("Pupuk", &["Urea", "NPK", "Organik", "Ponska"]),
        ExpenseCategory::new(
            "Pestisida",
            &["Debestan", "Ronsa", "Refaton", "Ema", "Plenum"],
        ),
        ExpenseCategory::new("Alat Tani", &["Sabit", "Cangkul", "Karung"]),
        ExpenseCategory::new("Tenaga Kerja", &["Upah Harian", "Borongan"]),
        ExpenseCategory::new("Lainnya", &["Lain-lain"]),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            balance_tolerance: default_balance_tolerance(),
            income_sources: default_income_sources(),
            expense_categories: default_expense_categories(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FarmbookPaths) -> Result<Self, FarmbookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FarmbookError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FarmbookError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FarmbookPaths) -> Result<(), FarmbookError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FarmbookError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FarmbookError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Find the category a subcategory belongs to
    pub fn category_of(&self, subcategory: &str) -> Option<&ExpenseCategory> {
        self.expense_categories
            .iter()
            .find(|c| c.subcategories.iter().any(|s| s == subcategory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.balance_tolerance, Money::from_units(1));
        assert_eq!(settings.income_sources[0], "Penjualan Padi");
        assert_eq!(settings.expense_categories.len(), 6);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FarmbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.balance_tolerance = Money::from_units(5);
        settings.income_sources.push("Sewa Traktor".to_string());

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.balance_tolerance, Money::from_units(5));
        assert!(loaded.income_sources.contains(&"Sewa Traktor".to_string()));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FarmbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"currency_symbol": "IDR", "balance_tolerance": "5"}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.balance_tolerance, Money::from_units(5));
        assert_eq!(loaded.expense_categories.len(), 6);
    }

    #[test]
    fn test_category_of() {
        let settings = Settings::default();
        assert_eq!(settings.category_of("Urea").unwrap().name, "Pupuk");
        assert!(settings.category_of("Traktor").is_none());
    }
}
