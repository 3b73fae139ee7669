//! Data dictionary output records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ColumnType;

/// Literal enumeration written for every boolean column.
pub const BOOLEAN_ENUMERATION: &str = "T=True;F=False";

/// Separator between enumerated values.
pub const ENUMERATION_SEPARATOR: &str = ";";

/// A min/max bound in the column's native numeric representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericBound {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for NumericBound {
    /// Floats always carry a fractional part (`2.0`, not `2`) so integer and
    /// float bounds stay distinguishable in CSV output. Magnitudes of `1e16`
    /// and above, or below `1e-4`, use exponent notation (`1e20`, `1e-7`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) if uses_exponent(value) => write!(f, "{value:e}"),
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

const EXPONENT_UPPER: f64 = 1e16;
const EXPONENT_LOWER: f64 = 1e-4;

fn uses_exponent(value: f64) -> bool {
    let magnitude = value.abs();
    value.is_finite() && value != 0.0 && !(EXPONENT_LOWER..EXPONENT_UPPER).contains(&magnitude)
}

/// Observed numeric range of a column. Absent when the column is not a scalar
/// numeric or has no non-missing values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: NumericBound,
    pub max: NumericBound,
}

/// One row of a data dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub variable_name: String,
    pub description: Option<String>,
    pub column_type: ColumnType,
    pub range: Option<NumericRange>,
    /// Reserved; no unit inference is performed.
    pub units: Option<String>,
    pub enumerated_values: Option<String>,
}

impl ColumnProfile {
    pub fn is_enumerated(&self) -> bool {
        self.enumerated_values.is_some()
    }

    /// `min` cell text, empty when no range is defined.
    pub fn min_text(&self) -> String {
        self.range
            .map(|range| range.min.to_string())
            .unwrap_or_default()
    }

    /// `max` cell text, empty when no range is defined.
    pub fn max_text(&self) -> String {
        self.range
            .map(|range| range.max.to_string())
            .unwrap_or_default()
    }
}

/// Ordered column profiles for one table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataDictionary {
    pub table_name: String,
    pub columns: Vec<ColumnProfile>,
}

impl DataDictionary {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns
            .iter()
            .find(|profile| profile.variable_name == name)
    }

    /// Number of columns carrying an enumeration, booleans included.
    pub fn enumerated_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|profile| profile.is_enumerated())
            .count()
    }
}
