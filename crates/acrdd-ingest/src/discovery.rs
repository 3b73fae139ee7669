//! Table export discovery for an export directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use acrdd_model::{SnapshotSchema, TableSchema};

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| IngestError::DirectoryRead {
                path: dir.to_path_buf(),
                source: e,
            })?
            .path();

        if path.is_file() && is_csv(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// A table export paired with its declared schema, if any.
#[derive(Debug, Clone)]
pub struct TableExport {
    /// Table name taken from the file stem.
    pub table: String,
    pub path: PathBuf,
    /// `None` when the snapshot does not declare this table.
    pub schema: Option<TableSchema>,
}

/// Result of pairing an export directory with a snapshot schema.
#[derive(Debug, Clone, Default)]
pub struct ExportDiscovery {
    /// Exports found on disk, in file name order.
    pub exports: Vec<TableExport>,
    /// Declared tables with no `<table>.csv` in the directory.
    pub missing: Vec<String>,
}

impl ExportDiscovery {
    pub fn export(&self, table: &str) -> Option<&TableExport> {
        self.exports.iter().find(|export| export.table == table)
    }

    /// Exports with no matching table declaration.
    pub fn undeclared(&self) -> impl Iterator<Item = &TableExport> {
        self.exports.iter().filter(|export| export.schema.is_none())
    }
}

/// Pairs every `<table>.csv` in `dir` with the snapshot's table of the same name.
pub fn discover_table_exports(dir: &Path, snapshot: &SnapshotSchema) -> Result<ExportDiscovery> {
    let mut by_table: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in list_csv_files(dir)? {
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            tracing::warn!(path = %path.display(), "skipping export with non UTF-8 name");
            continue;
        };
        by_table.insert(stem.to_string(), path);
    }

    let missing: Vec<String> = snapshot
        .table_names()
        .filter(|name| !by_table.contains_key(*name))
        .map(str::to_string)
        .collect();
    for table in &missing {
        tracing::warn!(table = %table, snapshot = %snapshot.name, "no export for declared table");
    }

    let exports = by_table
        .into_iter()
        .map(|(table, path)| {
            let schema = snapshot.table(&table).cloned();
            if schema.is_none() {
                tracing::warn!(table = %table, snapshot = %snapshot.name, "export has no declared schema");
            }
            TableExport {
                table,
                path,
                schema,
            }
        })
        .collect();

    Ok(ExportDiscovery { exports, missing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use acrdd_model::{ColumnSchema, DeclaredType};
    use tempfile::TempDir;

    fn create_export_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), "id\n1\n").unwrap();
        }
        dir
    }

    fn snapshot(tables: &[&str]) -> SnapshotSchema {
        SnapshotSchema {
            name: "snap".to_string(),
            data_project: None,
            tables: tables
                .iter()
                .map(|name| {
                    TableSchema::new(*name, vec![ColumnSchema::new("id", DeclaredType::String)])
                })
                .collect(),
        }
    }

    #[test]
    fn test_list_csv_files_sorted_and_filtered() {
        let dir = create_export_dir(&["sample.csv", "FAMILY.CSV", "notes.txt", "subject.csv"]);
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = list_csv_files(dir.path()).unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["FAMILY.CSV", "sample.csv", "subject.csv"]);
    }

    #[test]
    fn test_list_csv_files_not_a_directory() {
        let dir = create_export_dir(&["subject.csv"]);
        let result = list_csv_files(&dir.path().join("subject.csv"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_discover_pairs_exports_with_schema() {
        let dir = create_export_dir(&["subject.csv", "sample.csv", "extra.csv"]);
        let discovery = discover_table_exports(dir.path(), &snapshot(&["subject", "sample", "family"]))
            .unwrap();

        let tables: Vec<&str> = discovery.exports.iter().map(|e| e.table.as_str()).collect();
        assert_eq!(tables, vec!["extra", "sample", "subject"]);
        assert_eq!(discovery.missing, vec!["family".to_string()]);

        assert!(discovery.export("subject").unwrap().schema.is_some());
        let undeclared: Vec<&str> = discovery.undeclared().map(|e| e.table.as_str()).collect();
        assert_eq!(undeclared, vec!["extra"]);
    }
}
