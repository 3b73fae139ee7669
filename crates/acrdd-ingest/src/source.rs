//! Row and schema sources consumed by the inference engine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use acrdd_model::{SnapshotSchema, TableSchema};

use crate::csv::read_table_export;
use crate::discovery::{ExportDiscovery, list_csv_files};
use crate::error::{IngestError, Result};

/// Materializes the rows of a table.
///
/// Missing cells must come back as nulls, and a column's integer or float
/// dtype must hold for the whole table.
pub trait RowSource {
    fn rows(&self, table: &str) -> Result<DataFrame>;
}

/// Supplies the declared columns of a table.
pub trait SchemaSource {
    fn table_schema(&self, table: &str) -> Result<TableSchema>;
}

impl SchemaSource for SnapshotSchema {
    fn table_schema(&self, table: &str) -> Result<TableSchema> {
        self.table(table)
            .cloned()
            .ok_or_else(|| IngestError::TableNotDeclared {
                table: table.to_string(),
                snapshot: self.name.clone(),
            })
    }
}

/// A directory of `<table>.csv` exports.
#[derive(Debug, Clone)]
pub struct ExportDirectory {
    dir: PathBuf,
    exports: BTreeMap<String, PathBuf>,
}

impl ExportDirectory {
    /// Indexes the CSV files currently in `dir` by file stem.
    pub fn open(dir: &Path) -> Result<Self> {
        let exports = list_csv_files(dir)?
            .into_iter()
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?.to_string();
                Some((stem, path))
            })
            .collect();
        Ok(Self {
            dir: dir.to_path_buf(),
            exports,
        })
    }

    /// Serves exactly the exports found by an earlier discovery of `dir`.
    pub fn from_discovery(dir: &Path, discovery: &ExportDiscovery) -> Self {
        let exports = discovery
            .exports
            .iter()
            .map(|export| (export.table.clone(), export.path.clone()))
            .collect();
        Self {
            dir: dir.to_path_buf(),
            exports,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Table names with an export, sorted.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.exports.keys().map(String::as_str)
    }

    pub fn export_path(&self, table: &str) -> Option<&Path> {
        self.exports.get(table).map(PathBuf::as_path)
    }
}

impl RowSource for ExportDirectory {
    fn rows(&self, table: &str) -> Result<DataFrame> {
        let path = self
            .export_path(table)
            .ok_or_else(|| IngestError::ExportNotFound {
                table: table.to_string(),
            })?;
        read_table_export(path)
    }
}
