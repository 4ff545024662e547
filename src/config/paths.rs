//! Path management for Farmbook
//!
//! Resolves where settings, credentials, and the per-user record tables live.
//!
//! ## Path Resolution Order
//!
//! 1. `FARMBOOK_DATA_DIR` environment variable (if set)
//! 2. The platform data directory for `farmbook` (e.g. `~/.local/share/farmbook`)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::FarmbookError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FARMBOOK_DATA_DIR";

/// Manages all paths used by Farmbook
#[derive(Debug, Clone)]
pub struct FarmbookPaths {
    /// Base directory for all Farmbook data
    base_dir: PathBuf,
}

impl FarmbookPaths {
    /// Create a new FarmbookPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the platform data
    /// directory cannot be determined.
    pub fn new() -> Result<Self, FarmbookError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create FarmbookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the data directory holding the record tables
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the global credentials table
    pub fn credentials_file(&self) -> PathBuf {
        self.data_dir().join("akun.csv")
    }

    /// Get the path of a per-user table, e.g. `pemasukan_siti.csv`
    ///
    /// The username must already have been validated; see
    /// [`crate::auth::validate_username`].
    pub fn user_table_file(&self, base_name: &str, username: &str) -> PathBuf {
        self.data_dir().join(format!("{}_{}.csv", base_name, username))
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), FarmbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FarmbookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FarmbookError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
fn resolve_default_path() -> Result<PathBuf, FarmbookError> {
    ProjectDirs::from("", "", "farmbook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FarmbookError::Config("Could not determine a data directory".into()))
}
