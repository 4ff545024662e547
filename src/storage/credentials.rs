//! Global credentials table
//!
//! A single `akun.csv` holding one `Username,Password` row per user, where
//! `Password` is a password hash, never the password itself.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::paths::FarmbookPaths;
use crate::error::FarmbookResult;

use super::file_io::{read_csv_table, write_csv_table_atomic};

/// Column headers of the credentials table
pub const CREDENTIAL_COLUMNS: &[&str] = &["Username", "Password"];

/// One stored credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "Username")]
    pub username: String,

    #[serde(rename = "Password")]
    pub password_hash: String,
}

/// Repository for the credentials table
#[derive(Debug, Clone)]
pub struct CredentialRepository {
    path: PathBuf,
}

impl CredentialRepository {
    /// Create a repository over the credentials file of `paths`
    pub fn new(paths: &FarmbookPaths) -> Self {
        Self {
            path: paths.credentials_file(),
        }
    }

    /// Create a repository over an explicit file
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load every credential
    ///
    /// Unlike the record tables an unreadable credentials file is an error:
    /// starting empty would let anyone re-register existing names.
    pub fn load_all(&self) -> FarmbookResult<Vec<Credential>> {
        read_csv_table(&self.path, CREDENTIAL_COLUMNS)
    }

    /// Overwrite the table
    pub fn save_all(&self, credentials: &[Credential]) -> FarmbookResult<()> {
        write_csv_table_atomic(&self.path, CREDENTIAL_COLUMNS, credentials)
    }

    /// Look up a user's credential
    pub fn find(&self, username: &str) -> FarmbookResult<Option<Credential>> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|c| c.username == username))
    }

    /// Add a credential unless the username is taken
    ///
    /// Returns false (and writes nothing) if the username already exists.
    pub fn insert(&self, credential: Credential) -> FarmbookResult<bool> {
        let mut all = self.load_all()?;
        if all.iter().any(|c| c.username == credential.username) {
            return Ok(false);
        }
        all.push(credential);
        self.save_all(&all)?;
        Ok(true)
    }

    /// Replace the stored hash of an existing user
    pub fn update_hash(&self, username: &str, password_hash: String) -> FarmbookResult<bool> {
        let mut all = self.load_all()?;
        let Some(existing) = all.iter_mut().find(|c| c.username == username) else {
            return Ok(false);
        };
        existing.password_hash = password_hash;
        self.save_all(&all)?;
        Ok(true)
    }
}
