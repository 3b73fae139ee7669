//! Archive data dictionary (`*.data_dict.xml`) parsing.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use acrdd_model::{ArchiveDictionary, ArchiveVariable, CodedValue};

use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
struct DataTableElement {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(rename = "@study_id", default)]
    study_id: String,
    #[serde(rename = "variable", default)]
    variables: Vec<VariableElement>,
}

#[derive(Debug, Deserialize)]
struct VariableElement {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type", default)]
    var_type: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    logical_min: String,
    #[serde(default)]
    logical_max: String,
    #[serde(rename = "value", default)]
    values: Vec<ValueElement>,
    #[serde(default)]
    comment: String,
}

#[derive(Debug, Deserialize)]
struct ValueElement {
    #[serde(rename = "@code", default)]
    code: Option<String>,
    #[serde(rename = "$text", default)]
    text: String,
}

impl From<VariableElement> for ArchiveVariable {
    fn from(element: VariableElement) -> Self {
        Self {
            id: element.id,
            name: element.name,
            description: element.description,
            var_type: element.var_type,
            unit: element.unit,
            logical_min: element.logical_min,
            logical_max: element.logical_max,
            values: element
                .values
                .into_iter()
                .map(|value| CodedValue {
                    code: value.code,
                    text: value.text,
                })
                .collect(),
            comment: element.comment,
        }
    }
}

/// Parses an archive `data_table` document.
pub fn parse_archive_dictionary(xml: &str, path: &Path) -> Result<ArchiveDictionary> {
    let table: DataTableElement = quick_xml::de::from_str(xml).map_err(|e| IngestError::Xml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(ArchiveDictionary {
        table_id: table.id,
        study_id: table.study_id,
        variables: table.variables.into_iter().map(ArchiveVariable::from).collect(),
    })
}

/// Loads an archive data dictionary from disk.
pub fn load_archive_dictionary(path: &Path) -> Result<ArchiveDictionary> {
    let xml = fs::read_to_string(path).map_err(|e| IngestError::file(path, e))?;
    let dictionary = parse_archive_dictionary(&xml, path)?;
    tracing::debug!(
        path = %path.display(),
        table = %dictionary.table_id,
        variables = dictionary.variables.len(),
        "loaded archive dictionary"
    );
    Ok(dictionary)
}
