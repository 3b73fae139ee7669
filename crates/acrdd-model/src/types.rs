//! Declared and effective column types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar type declared for a column by the repository schema.
///
/// Repository datatype strings are folded onto this closed set when the
/// schema is loaded; anything unrecognised becomes [`DeclaredType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    String,
    Integer,
    Float,
    Boolean,
    #[default]
    Unknown,
}

impl DeclaredType {
    /// Maps a repository datatype string onto a declared type.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_datatype(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => Self::String,
            "integer" | "int64" => Self::Integer,
            "float" | "float64" | "numeric" => Self::Float,
            "boolean" => Self::Boolean,
            _ => Self::Unknown,
        }
    }

    /// Label used in data dictionary output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Unknown => "unknown",
        }
    }

    /// Plural form used in array labels (`array of integers`).
    fn plural(self) -> &'static str {
        match self {
            Self::String => "strings",
            Self::Integer => "integers",
            Self::Float => "floats",
            Self::Boolean => "booleans",
            Self::Unknown => "unknowns",
        }
    }

    /// Returns true for integer and float types.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective type of a profiled column.
///
/// Every declared type gets an array form, including booleans and unknowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Scalar(DeclaredType),
    ArrayOf(DeclaredType),
}

impl ColumnType {
    /// Derives the effective type from the declared type and array flag.
    pub fn effective(declared: DeclaredType, is_array: bool) -> Self {
        if is_array {
            Self::ArrayOf(declared)
        } else {
            Self::Scalar(declared)
        }
    }

    pub fn is_array(self) -> bool {
        matches!(self, Self::ArrayOf(_))
    }

    /// The scalar type, or `None` for arrays.
    pub fn scalar(self) -> Option<DeclaredType> {
        match self {
            Self::Scalar(declared) => Some(declared),
            Self::ArrayOf(_) => None,
        }
    }

    /// Label written to the `type` column of a data dictionary.
    pub fn label(self) -> String {
        match self {
            Self::Scalar(declared) => declared.as_str().to_string(),
            Self::ArrayOf(element) => format!("array of {}", element.plural()),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datatype_strings_fold_onto_closed_set() {
        assert_eq!(DeclaredType::from_datatype("string"), DeclaredType::String);
        assert_eq!(DeclaredType::from_datatype(" INT64 "), DeclaredType::Integer);
        assert_eq!(DeclaredType::from_datatype("float64"), DeclaredType::Float);
        assert_eq!(DeclaredType::from_datatype("numeric"), DeclaredType::Float);
        assert_eq!(DeclaredType::from_datatype("boolean"), DeclaredType::Boolean);
        assert_eq!(DeclaredType::from_datatype("fileref"), DeclaredType::Unknown);
        assert_eq!(DeclaredType::from_datatype(""), DeclaredType::Unknown);
    }

    #[test]
    fn labels() {
        let cases = [
            (ColumnType::Scalar(DeclaredType::String), "string"),
            (ColumnType::Scalar(DeclaredType::Unknown), "unknown"),
            (ColumnType::ArrayOf(DeclaredType::String), "array of strings"),
            (ColumnType::ArrayOf(DeclaredType::Integer), "array of integers"),
            (ColumnType::ArrayOf(DeclaredType::Float), "array of floats"),
            (ColumnType::ArrayOf(DeclaredType::Boolean), "array of booleans"),
            (ColumnType::ArrayOf(DeclaredType::Unknown), "array of unknowns"),
        ];
        for (column_type, expected) in cases {
            assert_eq!(column_type.to_string(), expected);
        }
    }

    #[test]
    fn effective_type_keeps_scalar_when_not_array() {
        let effective = ColumnType::effective(DeclaredType::Float, false);
        assert_eq!(effective.scalar(), Some(DeclaredType::Float));
        assert!(!effective.is_array());
        assert!(ColumnType::effective(DeclaredType::Float, true).is_array());
    }
}
