//! Per-user record tables
//!
//! The [`RecordStore`] trait is the persistence seam the services and
//! reports work against. [`CsvRecordStore`] keeps each table as
//! `<kind>_<username>.csv` in the data directory.
//!
//! "Append" is a read-modify-write of the whole table, and deletion is a full
//! rewrite without the removed row. There is no locking: two writers racing
//! on the same user's table can lose the earlier write.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::auth::UserContext;
use crate::config::paths::FarmbookPaths;
use crate::error::{FarmbookError, FarmbookResult};
use crate::models::Record;

use super::file_io::{read_csv_table, write_csv_table_atomic};

/// An ordered, in-memory copy of one record table
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R: Record> Table<R> {
    /// An empty table
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// A table holding `rows` in the given order
    pub fn from_rows(rows: Vec<R>) -> Self {
        Self { rows }
    }

    /// Column headers of this table kind
    pub fn columns(&self) -> &'static [&'static str] {
        R::KIND.columns()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    /// Add a row at the end
    pub fn push(&mut self, row: R) {
        self.rows.push(row);
    }

    /// Remove the row at `index`, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> Option<R> {
        if index < self.rows.len() {
            Some(self.rows.remove(index))
        } else {
            None
        }
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Persistence for per-user record tables
pub trait RecordStore {
    /// Load a user's table
    ///
    /// Never fails: a missing, blank, or unreadable table loads as empty.
    fn load<R: Record>(&self, user: &UserContext) -> Table<R>;

    /// Replace a user's table with `table`
    fn save<R: Record>(&self, table: &Table<R>, user: &UserContext) -> FarmbookResult<()>;

    /// Append one record, preserving insertion order
    fn append<R: Record>(&self, record: R, user: &UserContext) -> FarmbookResult<()> {
        self.append_all(vec![record], user)
    }

    /// Append several records with a single rewrite
    fn append_all<R: Record>(&self, records: Vec<R>, user: &UserContext) -> FarmbookResult<()> {
        let mut table = self.load::<R>(user);
        for record in records {
            table.push(record);
        }
        self.save(&table, user)
    }
}

/// File-backed record store using one CSV file per user and kind
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    paths: FarmbookPaths,
}

impl CsvRecordStore {
    /// Create a new store, creating the data directory if needed
    pub fn new(paths: FarmbookPaths) -> FarmbookResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FarmbookPaths {
        &self.paths
    }

    /// The file backing a user's table of kind `R`
    pub fn table_path<R: Record>(&self, user: &UserContext) -> PathBuf {
        self.paths.user_table_file(R::KIND.base_name(), user.username())
    }

    /// Move an unreadable table out of the way so the next save cannot clobber it
    fn quarantine(&self, path: &Path) -> Option<PathBuf> {
        let aside = path.with_extension(format!(
            "unreadable-{}.csv",
            chrono::Local::now().format("%Y%m%d%H%M%S")
        ));
        fs::rename(path, &aside).ok().map(|_| aside)
    }
}

impl RecordStore for CsvRecordStore {
    fn load<R: Record>(&self, user: &UserContext) -> Table<R> {
        let path = self.table_path::<R>(user);
        let kind = R::KIND;

        match read_csv_table::<R, _>(&path, kind.columns()) {
            Ok(rows) => {
                debug!(kind = %kind, user = user.username(), rows = rows.len(), "loaded table");
                Table::from_rows(rows)
            }
            Err(FarmbookError::Storage(reason)) => {
                let moved = self.quarantine(&path);
                warn!(
                    kind = %kind,
                    user = user.username(),
                    %reason,
                    moved_to = ?moved,
                    "unreadable table, starting empty"
                );
                Table::new()
            }
            Err(other) => {
                warn!(kind = %kind, user = user.username(), error = %other, "failed to load table");
                Table::new()
            }
        }
    }

    fn save<R: Record>(&self, table: &Table<R>, user: &UserContext) -> FarmbookResult<()> {
        let path = self.table_path::<R>(user);
        let kind = R::KIND;
        write_csv_table_atomic(&path, kind.columns(), table.rows())?;
        debug!(kind = %kind, user = user.username(), rows = table.len(), "saved table");
        Ok(())
    }
}
