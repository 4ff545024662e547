//! CSV table I/O with atomic writes
//!
//! Tables are small flat files with a fixed header. Reads are all-or-nothing:
//! a table with any row that does not deserialize is reported as unreadable,
//! because the next whole-table rewrite would otherwise drop that row. Writes
//! replace the whole file via a temp file and a rename so a crash never leaves
//! a half-written table.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FarmbookError;

/// Read all rows of a CSV table
///
/// Returns an empty list if the file doesn't exist or is blank.
///
/// # Errors
///
/// Returns a storage error if the file cannot be read, its header lacks
/// one of `columns`, or any row fails to deserialize.
pub fn read_csv_table<T, P>(path: P, columns: &[&str]) -> Result<Vec<T>, FarmbookError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| FarmbookError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(contents.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FarmbookError::Storage(format!("Failed to parse {}: {}", path.display(), e)))?
        .clone();

    if let Some(missing) = columns.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(FarmbookError::Storage(format!(
            "{} is missing column '{}'",
            path.display(),
            missing
        )));
    }

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                return Err(FarmbookError::Storage(format!(
                    "{} has a malformed row {}: {}",
                    path.display(),
                    index,
                    e
                )))
            }
        }
    }

    Ok(rows)
}

/// Write a CSV table atomically (write to temp, then rename)
///
/// The header is always written, so an empty table still records its shape.
pub fn write_csv_table_atomic<T, P>(path: P, columns: &[&str], rows: &[T]) -> Result<(), FarmbookError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FarmbookError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = path.with_extension("csv.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FarmbookError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer
        .write_record(columns)
        .map_err(|e| FarmbookError::Storage(format!("Failed to write header: {}", e)))?;

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| FarmbookError::Storage(format!("Failed to serialize row: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| FarmbookError::Storage(format!("Failed to flush data: {}", e)))?;

    let mut file = writer
        .into_inner()
        .map_err(|e| FarmbookError::Storage(format!("Failed to finish writing: {}", e)))?;

    file.flush()
        .map_err(|e| FarmbookError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| FarmbookError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        // Try to clean up temp file if rename fails
        let _ = fs::remove_file(&temp_path);
        FarmbookError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
