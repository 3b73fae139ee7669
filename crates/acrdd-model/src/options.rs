//! Configuration options for data dictionary profiling.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Default percentage of distinct values below which a column is enumerated.
pub const DEFAULT_ENUMERATION_THRESHOLD: u8 = 30;

/// Default suffix appended to table names for dictionary files.
pub const DEFAULT_DICTIONARY_SUFFIX: &str = "_data_dict.csv";

/// Percentage (0-100) controlling the cardinality cutoff for enumerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct EnumerationThreshold(u8);

impl EnumerationThreshold {
    /// Creates a threshold, rejecting values above 100.
    pub fn new(percent: u32) -> Result<Self> {
        if percent > 100 {
            return Err(ModelError::InvalidThreshold { value: percent });
        }
        // percent <= 100 fits in a u8
        Ok(Self(percent as u8))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Largest distinct-value count that still qualifies as enumerated for
    /// `non_null_count` populated cells.
    pub fn allows(self, unique_count: usize, non_null_count: usize) -> bool {
        // unique <= non_null * pct / 100, kept in integers to avoid float drift
        (unique_count as u128) * 100 <= (non_null_count as u128) * u128::from(self.0)
    }
}

impl Default for EnumerationThreshold {
    fn default() -> Self {
        Self(DEFAULT_ENUMERATION_THRESHOLD)
    }
}

impl TryFrom<u32> for EnumerationThreshold {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<EnumerationThreshold> for u32 {
    fn from(value: EnumerationThreshold) -> Self {
        u32::from(value.0)
    }
}

/// Options controlling a profiling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileOptions {
    pub enumeration_threshold: EnumerationThreshold,
    /// Restrict profiling to these tables. Empty means every table.
    pub tables: Vec<String>,
    /// Suffix appended to the table name for the output file.
    pub dictionary_suffix: String,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            enumeration_threshold: EnumerationThreshold::default(),
            tables: Vec::new(),
            dictionary_suffix: DEFAULT_DICTIONARY_SUFFIX.to_string(),
        }
    }
}

impl ProfileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: EnumerationThreshold) -> Self {
        self.enumeration_threshold = threshold;
        self
    }

    pub fn with_tables(mut self, tables: Vec<String>) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_dictionary_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.dictionary_suffix = suffix.into();
        self
    }

    /// Returns true when `table` passes the table filter.
    pub fn includes_table(&self, table: &str) -> bool {
        self.tables.is_empty() || self.tables.iter().any(|name| name == table)
    }

    /// Output file name for a table's dictionary.
    pub fn dictionary_file_name(&self, table: &str) -> String {
        format!("{table}{}", self.dictionary_suffix)
    }
}
