//! Snapshot and dataset schema documents from the cloud data repository.
//!
//! Two shapes are accepted, mirroring the repository's retrieve endpoints:
//!
//! - snapshot: `{"name", "data_project", "tables": [...]}`
//! - dataset: `{"name", "schema": {"tables": [...]}}`

use std::fs;
use std::path::Path;

use serde::Deserialize;

use acrdd_model::{ColumnSchema, DeclaredType, SnapshotSchema, TableSchema};

use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    name: String,
    #[serde(default)]
    data_project: Option<String>,
    #[serde(default)]
    tables: Option<Vec<TableDocument>>,
    #[serde(default)]
    schema: Option<DatasetSchemaDocument>,
}

#[derive(Debug, Deserialize)]
struct DatasetSchemaDocument {
    #[serde(default)]
    tables: Vec<TableDocument>,
}

#[derive(Debug, Deserialize)]
struct TableDocument {
    name: String,
    #[serde(default)]
    columns: Vec<ColumnDocument>,
}

#[derive(Debug, Deserialize)]
struct ColumnDocument {
    name: String,
    #[serde(default)]
    datatype: String,
    #[serde(default)]
    array_of: bool,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    description: Option<String>,
}

impl From<ColumnDocument> for ColumnSchema {
    fn from(doc: ColumnDocument) -> Self {
        Self {
            name: doc.name,
            declared_type: DeclaredType::from_datatype(&doc.datatype),
            is_array: doc.array_of,
            is_required: doc.required,
            description: doc.description.filter(|text| !text.trim().is_empty()),
        }
    }
}

impl From<TableDocument> for TableSchema {
    fn from(doc: TableDocument) -> Self {
        Self {
            name: doc.name,
            columns: doc.columns.into_iter().map(ColumnSchema::from).collect(),
        }
    }
}

/// Parses a snapshot or dataset schema document.
pub fn parse_snapshot_schema(json: &str, path: &Path) -> Result<SnapshotSchema> {
    let doc: SchemaDocument = serde_json::from_str(json).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tables = match (doc.tables, doc.schema) {
        (Some(tables), _) => tables,
        (None, Some(schema)) => schema.tables,
        (None, None) => {
            return Err(IngestError::NoTables {
                path: path.to_path_buf(),
            });
        }
    };

    Ok(SnapshotSchema {
        name: doc.name,
        data_project: doc.data_project,
        tables: tables.into_iter().map(TableSchema::from).collect(),
    })
}

/// Loads a snapshot or dataset schema document from disk.
pub fn load_snapshot_schema(path: &Path) -> Result<SnapshotSchema> {
    let json = fs::read_to_string(path).map_err(|e| IngestError::file(path, e))?;
    let schema = parse_snapshot_schema(&json, path)?;
    tracing::debug!(
        snapshot = %schema.name,
        tables = schema.tables.len(),
        "loaded snapshot schema"
    );
    Ok(schema)
}
