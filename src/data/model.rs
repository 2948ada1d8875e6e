use std::collections::BTreeMap;
use std::fmt;

use super::classify::normalize_model;
use super::error::LoadError;

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

pub const USERNAME_COL: &str = "Username";
pub const DEVICE_ID_COL: &str = "Used Device Id";
pub const DEVICE_MODEL_COL: &str = "Used Device Model";
pub const AREA_COL: &str = "Area";
pub const REGION_COL: &str = "Region";

/// Columns a usage export must provide. Names match the export headers
/// exactly (case and spacing).
pub const REQUIRED_COLUMNS: [&str; 5] = [
    USERNAME_COL,
    DEVICE_ID_COL,
    DEVICE_MODEL_COL,
    AREA_COL,
    REGION_COL,
];

// ---------------------------------------------------------------------------
// RawTable – the loader's format-agnostic intermediate
// ---------------------------------------------------------------------------

/// Named columns plus rows of text-coerced cells, as produced by any of the
/// format loaders. Consumed exactly once by [`UsageDataset::from_raw`].
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// One map per row: column name → cell text.
    pub rows: Vec<BTreeMap<String, String>>,
}

// ---------------------------------------------------------------------------
// UsageRecord – one row of the uploaded table
// ---------------------------------------------------------------------------

/// A single schema-validated usage record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub username: String,
    pub device_id: String,
    /// Canonical model text (trimmed, quote-free).
    pub device_model: String,
    pub area: String,
    pub region: String,
}

// ---------------------------------------------------------------------------
// GroupField – the report's grouping dimension
// ---------------------------------------------------------------------------

/// Which categorical field buckets records for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Area,
    Region,
}

impl GroupField {
    /// The source column this field reads.
    pub fn column(self) -> &'static str {
        match self {
            GroupField::Area => AREA_COL,
            GroupField::Region => REGION_COL,
        }
    }

    /// The field's value on a record.
    pub fn value(self, record: &UsageRecord) -> &str {
        match self {
            GroupField::Area => &record.area,
            GroupField::Region => &record.region,
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// UsageDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset held for the session.
#[derive(Debug, Clone)]
pub struct UsageDataset {
    pub records: Vec<UsageRecord>,
}

impl UsageDataset {
    /// Validate the required columns and build typed records.
    ///
    /// Cells absent from a row coerce to the empty string. The device-model
    /// field is normalized here, once, so every consumer downstream sees
    /// canonical text.
    pub fn from_raw(table: RawTable) -> Result<Self, LoadError> {
        for col in REQUIRED_COLUMNS {
            if !table.columns.iter().any(|c| c == col) {
                return Err(LoadError::MissingColumn(col));
            }
        }

        let records = table
            .rows
            .into_iter()
            .map(|mut row| {
                let mut take = |col: &str| row.remove(col).unwrap_or_default();
                UsageRecord {
                    username: take(USERNAME_COL),
                    device_id: take(DEVICE_ID_COL),
                    device_model: normalize_model(&take(DEVICE_MODEL_COL)),
                    area: take(AREA_COL),
                    region: take(REGION_COL),
                }
            })
            .collect();

        Ok(UsageDataset { records })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
