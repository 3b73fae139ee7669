//! Assembles a data dictionary from a table's schema and materialized rows.

use polars::prelude::{Column, DataFrame};
use tracing::{debug, warn};

use acrdd_model::{
    ColumnProfile, ColumnType, DataDictionary, EnumerationThreshold, TableSchema,
};

use crate::classify::classify_column;
use crate::error::{InferError, Result};
use crate::mapper::{ColumnAttributes, SchemaLookup};
use crate::range::numeric_range;

/// Builds data dictionaries for tables.
///
/// Holds only the threshold, so one builder can profile any number of tables
/// (from any number of threads) without shared state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryBuilder {
    threshold: EnumerationThreshold,
}

impl DictionaryBuilder {
    pub fn new(threshold: EnumerationThreshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> EnumerationThreshold {
        self.threshold
    }

    /// Profiles every column of `data`, in column order.
    pub fn build(&self, schema: &TableSchema, data: &DataFrame) -> DataDictionary {
        let lookup = SchemaLookup::new(schema);
        let mut dictionary = DataDictionary::new(&schema.name);
        for column in data.get_columns() {
            dictionary.columns.push(self.profile(column, &lookup));
        }
        dictionary
    }

    /// Like [`build`](Self::build), but checks `should_stop` before each
    /// column and returns [`InferError::Cancelled`] when it fires.
    pub fn build_until<F>(
        &self,
        schema: &TableSchema,
        data: &DataFrame,
        should_stop: F,
    ) -> Result<DataDictionary>
    where
        F: Fn() -> bool,
    {
        let lookup = SchemaLookup::new(schema);
        let mut dictionary = DataDictionary::new(&schema.name);
        for column in data.get_columns() {
            if should_stop() {
                return Err(InferError::Cancelled {
                    table: schema.name.clone(),
                    completed: dictionary.len(),
                });
            }
            dictionary.columns.push(self.profile(column, &lookup));
        }
        Ok(dictionary)
    }

    /// Profiles one column. Statistic failures degrade this column's profile
    /// only; the declared type and description are always kept.
    fn profile(&self, column: &Column, lookup: &SchemaLookup) -> ColumnProfile {
        let name = column.name().as_str();
        if !lookup.contains(name) {
            debug!(column = %name, "column not declared in schema, profiling as unknown");
        }
        let attributes = lookup.get(name);

        let (column_type, enumerated_values) =
            match classify_column(column, attributes, self.threshold) {
                Ok(classification) => (
                    classification.column_type,
                    classification.enumerated_values,
                ),
                Err(error) => {
                    warn!(column = %name, %error, "enumeration detection failed");
                    (effective_type(attributes), None)
                }
            };

        let range = numeric_range(column, column_type).unwrap_or_else(|error| {
            warn!(column = %name, %error, "range extraction failed");
            None
        });

        ColumnProfile {
            variable_name: name.to_string(),
            description: attributes.description.clone(),
            column_type,
            range,
            units: None,
            enumerated_values,
        }
    }
}

fn effective_type(attributes: &ColumnAttributes) -> ColumnType {
    ColumnType::effective(attributes.declared_type, attributes.is_array)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use acrdd_model::{ColumnSchema, DeclaredType};
    use polars::prelude::df;

    fn subject_schema() -> TableSchema {
        TableSchema::new(
            "subject",
            vec![
                ColumnSchema::new("subject_id", DeclaredType::String).with_required(true),
                ColumnSchema::new("age", DeclaredType::Integer),
                ColumnSchema::new("sex", DeclaredType::String),
            ],
        )
    }

    #[test]
    fn profiles_follow_data_column_order() {
        let data = df! {
            "sex" => &["M", "F", "M", "F"],
            "subject_id" => &["s1", "s2", "s3", "s4"],
            "age" => &[30i64, 41, 25, 60],
        }
        .unwrap();
        let dictionary = DictionaryBuilder::default().build(&subject_schema(), &data);
        let names: Vec<&str> = dictionary
            .columns
            .iter()
            .map(|profile| profile.variable_name.as_str())
            .collect();
        assert_eq!(names, vec!["sex", "subject_id", "age"]);
        assert_eq!(dictionary.table_name, "subject");
    }

    #[test]
    fn cancellation_stops_between_columns() {
        let data = df! {
            "subject_id" => &["s1", "s2"],
            "age" => &[30i64, 41],
        }
        .unwrap();
        let calls = Cell::new(0usize);
        let result = DictionaryBuilder::default().build_until(&subject_schema(), &data, || {
            calls.set(calls.get() + 1);
            calls.get() > 1
        });
        assert!(matches!(
            result,
            Err(InferError::Cancelled { completed: 1, .. })
        ));
    }

    #[test]
    fn build_until_without_stop_matches_build() {
        let data = df! {
            "subject_id" => &["s1", "s2"],
            "age" => &[30i64, 41],
        }
        .unwrap();
        let builder = DictionaryBuilder::default();
        let full = builder.build_until(&subject_schema(), &data, || false).unwrap();
        assert_eq!(full, builder.build(&subject_schema(), &data));
    }
}
