//! Column name to declared schema attribute lookup.

use std::collections::BTreeMap;

use acrdd_model::{ColumnSchema, DeclaredType, TableSchema};

/// Declared attributes of a column as seen by the classifier.
///
/// The default is what a column absent from the schema gets: unknown type,
/// scalar, optional, no description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnAttributes {
    pub declared_type: DeclaredType,
    pub is_array: bool,
    pub is_required: bool,
    pub description: Option<String>,
}

impl From<&ColumnSchema> for ColumnAttributes {
    fn from(column: &ColumnSchema) -> Self {
        Self {
            declared_type: column.declared_type,
            is_array: column.is_array,
            is_required: column.is_required,
            description: column.description.clone(),
        }
    }
}

/// Lookup built once per table.
#[derive(Debug, Clone, Default)]
pub struct SchemaLookup {
    columns: BTreeMap<String, ColumnAttributes>,
    fallback: ColumnAttributes,
}

impl SchemaLookup {
    /// Builds the lookup from a table schema. A repeated column name keeps
    /// the last declaration.
    pub fn new(schema: &TableSchema) -> Self {
        let columns = schema
            .columns
            .iter()
            .map(|column| (column.name.clone(), ColumnAttributes::from(column)))
            .collect();
        Self {
            columns,
            fallback: ColumnAttributes::default(),
        }
    }

    /// Attributes for `name`, or the unknown defaults when undeclared.
    pub fn get(&self, name: &str) -> &ColumnAttributes {
        self.columns.get(name).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
