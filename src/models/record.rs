//! Shared plumbing for the three persisted record kinds
//!
//! Every record table carries a `Tanggal` column. Dates that fail to parse are
//! kept as `None` ("missing") so the rest of the row stays usable; reports
//! skip such rows.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Format used when writing the `Tanggal` column
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The kinds of record tables kept per user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Income,
    Expense,
    Journal,
}

impl RecordKind {
    /// Base file name; the username is appended to partition per user
    pub fn base_name(&self) -> &'static str {
        match self {
            Self::Income => "pemasukan",
            Self::Expense => "pengeluaran",
            Self::Journal => "jurnal",
        }
    }

    /// Column headers, in file order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Income => &["Tanggal", "Sumber", "Jumlah", "Metode", "Keterangan", "Username"],
            Self::Expense => &[
                "Tanggal",
                "Kategori",
                "Sub Kategori",
                "Jumlah",
                "Keterangan",
                "Metode",
                "Username",
            ],
            Self::Journal => &["Tanggal", "Akun", "Debit", "Kredit", "Keterangan"],
        }
    }

    /// Human-readable entity name used in errors
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Journal => "Journal line",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity_name())
    }
}

/// A row type that can be stored in a per-user record table
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Which table this record lives in
    const KIND: RecordKind;

    /// The record's date, or `None` when the stored value was malformed
    fn date(&self) -> Option<NaiveDateTime>;
}

/// Parse a stored date, accepting the formats other tools commonly write
pub fn parse_record_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(raw, RECORD_DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
}

/// Serde adapter for the `Tanggal` column
pub mod record_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_record_date, RECORD_DATE_FORMAT};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format(RECORD_DATE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(parse_record_date(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert_eq!(parse_record_date("2025-03-14 00:00:00"), Some(expected));
        assert_eq!(parse_record_date("2025-03-14"), Some(expected));
        assert_eq!(parse_record_date("2025-03-14T00:00:00"), Some(expected));
        assert_eq!(parse_record_date("2025-03-14T00:00:00+07:00"), Some(expected));
    }

    #[test]
    fn test_malformed_dates_are_missing() {
        assert_eq!(parse_record_date(""), None);
        assert_eq!(parse_record_date("kemarin"), None);
        assert_eq!(parse_record_date("2025-13-40"), None);
    }

    #[test]
    fn test_columns_per_kind() {
        assert_eq!(RecordKind::Income.columns().len(), 6);
        assert_eq!(RecordKind::Expense.columns()[2], "Sub Kategori");
        assert_eq!(RecordKind::Journal.columns()[3], "Kredit");
    }
}
