//! Effective type and enumeration detection for a single column.

use std::collections::HashSet;

use polars::prelude::{Column, DataType, PolarsResult};

use acrdd_model::{
    BOOLEAN_ENUMERATION, ColumnType, DeclaredType, ENUMERATION_SEPARATOR, EnumerationThreshold,
};

use crate::error::{InferError, Result};
use crate::mapper::ColumnAttributes;

/// Population statistics of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStats {
    /// Row count, missing cells included.
    pub total: usize,
    /// Non-missing cell count.
    pub non_null: usize,
    /// Distinct non-missing values in first-seen order.
    pub distinct: Vec<String>,
}

impl ColumnStats {
    pub fn unique_count(&self) -> usize {
        self.distinct.len()
    }

    /// Applies the uniqueness-ratio heuristic.
    ///
    /// A column is enumerated when it has at least one value, at least one
    /// duplicate, and its distinct count is within `threshold` percent of its
    /// non-missing count.
    pub fn is_enumerated(&self, threshold: EnumerationThreshold) -> bool {
        let unique = self.unique_count();
        unique > 0 && unique < self.total && threshold.allows(unique, self.non_null)
    }

    /// Distinct values joined with `;`. No escaping is applied.
    pub fn joined_values(&self) -> String {
        self.distinct.join(ENUMERATION_SEPARATOR)
    }
}

/// Computes population statistics, rendering values as text.
pub fn column_stats(column: &Column) -> PolarsResult<ColumnStats> {
    let total = column.len();
    let non_null = total - column.null_count();
    let text = column.as_materialized_series().cast(&DataType::String)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut distinct = Vec::new();
    for value in text.str()?.iter().flatten() {
        if seen.insert(value) {
            distinct.push(value.to_string());
        }
    }

    Ok(ColumnStats {
        total,
        non_null,
        distinct,
    })
}

/// Classifier verdict for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub column_type: ColumnType,
    pub enumerated_values: Option<String>,
}

/// Decides the effective type and enumeration of a column.
///
/// Only scalar string columns go through the ratio test. Scalar booleans
/// always get [`BOOLEAN_ENUMERATION`]. Arrays are never enumerated.
pub fn classify_column(
    column: &Column,
    attributes: &ColumnAttributes,
    threshold: EnumerationThreshold,
) -> Result<Classification> {
    let column_type = ColumnType::effective(attributes.declared_type, attributes.is_array);

    let enumerated_values = match column_type {
        ColumnType::Scalar(DeclaredType::String) => {
            let stats = column_stats(column)
                .map_err(|err| InferError::column(column.name().as_str(), &err))?;
            tracing::trace!(
                column = %column.name(),
                total = stats.total,
                non_null = stats.non_null,
                unique = stats.unique_count(),
                "string column stats"
            );
            stats
                .is_enumerated(threshold)
                .then(|| stats.joined_values())
        }
        ColumnType::Scalar(DeclaredType::Boolean) => Some(BOOLEAN_ENUMERATION.to_string()),
        _ => None,
    };

    Ok(Classification {
        column_type,
        enumerated_values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn string_column(name: &str, values: &[Option<&str>]) -> Column {
        Series::new(name.into(), values.to_vec()).into_column()
    }

    fn attributes(declared_type: DeclaredType, is_array: bool) -> ColumnAttributes {
        ColumnAttributes {
            declared_type,
            is_array,
            ..ColumnAttributes::default()
        }
    }

    fn threshold(percent: u32) -> EnumerationThreshold {
        EnumerationThreshold::new(percent).unwrap()
    }

    #[test]
    fn stats_skip_missing_and_keep_first_seen_order() {
        let column = string_column("c", &[Some("b"), None, Some("a"), Some("b"), None]);
        let stats = column_stats(&column).unwrap();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.non_null, 3);
        assert_eq!(stats.distinct, vec!["b", "a"]);
    }

    #[test]
    fn low_cardinality_string_is_enumerated() {
        let values = ["M", "F", "M", "M", "F", "F", "M", "F", "M", "F"];
        let column = string_column("sex", &values.map(Some));
        let result =
            classify_column(&column, &attributes(DeclaredType::String, false), threshold(50))
                .unwrap();
        assert_eq!(result.column_type, ColumnType::Scalar(DeclaredType::String));
        assert_eq!(result.enumerated_values.as_deref(), Some("M;F"));
    }

    #[test]
    fn threshold_boundary() {
        // 20 rows, 6 distinct values
        let values: Vec<Option<&str>> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .cycle()
            .take(20)
            .map(|v| Some(*v))
            .collect();
        let column = string_column("c", &values);
        let attrs = attributes(DeclaredType::String, false);

        let at_30 = classify_column(&column, &attrs, threshold(30)).unwrap();
        assert_eq!(at_30.enumerated_values.as_deref(), Some("a;b;c;d;e;f"));

        let at_25 = classify_column(&column, &attrs, threshold(25)).unwrap();
        assert!(at_25.enumerated_values.is_none());
    }

    #[test]
    fn all_distinct_is_never_enumerated() {
        let column = string_column("id", &[Some("s1"), Some("s2"), Some("s3")]);
        let result =
            classify_column(&column, &attributes(DeclaredType::String, false), threshold(100))
                .unwrap();
        assert!(result.enumerated_values.is_none());
    }

    #[test]
    fn all_missing_is_never_enumerated() {
        let column = string_column("empty", &[None, None, None]);
        let result =
            classify_column(&column, &attributes(DeclaredType::String, false), threshold(100))
                .unwrap();
        assert!(result.enumerated_values.is_none());
    }

    #[test]
    fn missing_values_are_not_enumerated_tokens() {
        let column = string_column("c", &[Some("x"), None, Some("x"), Some("y"), None]);
        let result =
            classify_column(&column, &attributes(DeclaredType::String, false), threshold(100))
                .unwrap();
        assert_eq!(result.enumerated_values.as_deref(), Some("x;y"));
    }

    #[test]
    fn boolean_gets_fixed_literal() {
        let column = Series::new("flag".into(), &[true, true, true]).into_column();
        let result =
            classify_column(&column, &attributes(DeclaredType::Boolean, false), threshold(0))
                .unwrap();
        assert_eq!(result.enumerated_values.as_deref(), Some("T=True;F=False"));
    }

    #[test]
    fn arrays_are_labelled_and_never_enumerated() {
        let column = string_column("tags", &[Some("a"), Some("a"), Some("a")]);
        for declared in [
            DeclaredType::String,
            DeclaredType::Integer,
            DeclaredType::Float,
            DeclaredType::Boolean,
            DeclaredType::Unknown,
        ] {
            let result =
                classify_column(&column, &attributes(declared, true), threshold(100)).unwrap();
            assert_eq!(result.column_type, ColumnType::ArrayOf(declared));
            assert!(result.enumerated_values.is_none());
        }
    }

    #[test]
    fn non_string_scalars_are_not_enumerated() {
        let column = Series::new("n".into(), &[1i64, 1, 1, 2]).into_column();
        for declared in [DeclaredType::Integer, DeclaredType::Float, DeclaredType::Unknown] {
            let result =
                classify_column(&column, &attributes(declared, false), threshold(100)).unwrap();
            assert!(result.enumerated_values.is_none());
        }
    }

    #[test]
    fn numeric_data_under_string_declaration_renders_as_text() {
        let column = Series::new("zip".into(), &[Some(10001i64), Some(10001), None, Some(2139)])
            .into_column();
        let result =
            classify_column(&column, &attributes(DeclaredType::String, false), threshold(100))
                .unwrap();
        assert_eq!(result.enumerated_values.as_deref(), Some("10001;2139"));
    }
}
