//! Storage layer for Farmbook
//!
//! Provides CSV table storage with atomic writes: the per-user record tables
//! behind [`RecordStore`] and the global credentials table.

pub mod credentials;
pub mod file_io;
pub mod records;

pub use credentials::{Credential, CredentialRepository};
pub use file_io::{read_csv_table, write_csv_table_atomic};
pub use records::{CsvRecordStore, RecordStore, Table};
