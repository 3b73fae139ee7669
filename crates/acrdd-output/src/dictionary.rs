//! Data dictionary CSV output.

use std::io::Write;
use std::path::{Path, PathBuf};

use acrdd_model::DataDictionary;

use crate::atomic::write_atomic;
use crate::error::{OutputError, Result};

/// Column headers of a data dictionary file, in order.
pub const DICTIONARY_HEADERS: [&str; 7] = [
    "variable_name",
    "description",
    "type",
    "min",
    "max",
    "units",
    "enumerated_values",
];

/// Writes one header row plus one row per profile, in profile order.
///
/// Absent values are written as empty cells.
pub fn write_data_dictionary<W: Write>(dictionary: &DataDictionary, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(DICTIONARY_HEADERS)?;

    for profile in &dictionary.columns {
        let column_type = profile.column_type.to_string();
        let min = profile.min_text();
        let max = profile.max_text();
        csv.write_record([
            profile.variable_name.as_str(),
            profile.description.as_deref().unwrap_or_default(),
            column_type.as_str(),
            min.as_str(),
            max.as_str(),
            profile.units.as_deref().unwrap_or_default(),
            profile.enumerated_values.as_deref().unwrap_or_default(),
        ])?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Renders a data dictionary to an in-memory CSV string.
pub fn data_dictionary_csv_string(dictionary: &DataDictionary) -> Result<String> {
    let mut buffer = Vec::new();
    write_data_dictionary(dictionary, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| {
        OutputError::Csv(csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e,
        )))
    })
}

/// Writes `<dir>/<file_name>` atomically and returns the path written.
pub fn write_dictionary_file(
    dir: &Path,
    file_name: &str,
    dictionary: &DataDictionary,
) -> Result<PathBuf> {
    if file_name.is_empty() || Path::new(file_name).file_name().is_none() {
        return Err(OutputError::InvalidFileName {
            name: file_name.to_string(),
        });
    }

    let mut buffer = Vec::new();
    write_data_dictionary(dictionary, &mut buffer)?;

    let path = dir.join(file_name);
    write_atomic(&path, &buffer)?;
    tracing::info!(
        table = %dictionary.table_name,
        columns = dictionary.len(),
        path = %path.display(),
        "wrote data dictionary"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acrdd_model::{
        BOOLEAN_ENUMERATION, ColumnProfile, ColumnType, DeclaredType, NumericBound, NumericRange,
    };
    use tempfile::TempDir;

    fn profile(name: &str, column_type: ColumnType) -> ColumnProfile {
        ColumnProfile {
            variable_name: name.to_string(),
            description: None,
            column_type,
            range: None,
            units: None,
            enumerated_values: None,
        }
    }

    fn sample_dictionary() -> DataDictionary {
        let mut dictionary = DataDictionary::new("subject");
        dictionary.columns = vec![
            ColumnProfile {
                description: Some("Participant identifier".to_string()),
                ..profile("subject_id", ColumnType::Scalar(DeclaredType::String))
            },
            ColumnProfile {
                enumerated_values: Some("M;F".to_string()),
                ..profile("sex", ColumnType::Scalar(DeclaredType::String))
            },
            ColumnProfile {
                description: Some("Age, in years".to_string()),
                range: Some(NumericRange {
                    min: NumericBound::Integer(18),
                    max: NumericBound::Integer(90),
                }),
                ..profile("age", ColumnType::Scalar(DeclaredType::Integer))
            },
            ColumnProfile {
                range: Some(NumericRange {
                    min: NumericBound::Float(1.5),
                    max: NumericBound::Float(2.0),
                }),
                ..profile("ratio", ColumnType::Scalar(DeclaredType::Float))
            },
            ColumnProfile {
                enumerated_values: Some(BOOLEAN_ENUMERATION.to_string()),
                ..profile("affected", ColumnType::Scalar(DeclaredType::Boolean))
            },
            profile("phenotypes", ColumnType::ArrayOf(DeclaredType::String)),
            profile("extra_col", ColumnType::Scalar(DeclaredType::Unknown)),
        ];
        dictionary
    }

    #[test]
    fn test_data_dictionary_csv() {
        let csv = data_dictionary_csv_string(&sample_dictionary()).unwrap();
        insta::assert_snapshot!(csv, @r#"
        variable_name,description,type,min,max,units,enumerated_values
        subject_id,Participant identifier,string,,,,
        sex,,string,,,,M;F
        age,"Age, in years",integer,18,90,,
        ratio,,float,1.5,2.0,,
        affected,,boolean,,,,T=True;F=False
        phenotypes,,array of strings,,,,
        extra_col,,unknown,,,,
        "#);
    }

    #[test]
    fn test_empty_dictionary_has_header_only() {
        let csv = data_dictionary_csv_string(&DataDictionary::new("empty")).unwrap();
        assert_eq!(
            csv,
            "variable_name,description,type,min,max,units,enumerated_values\n"
        );
    }

    #[test]
    fn test_write_dictionary_file() {
        let dir = TempDir::new().unwrap();
        let path =
            write_dictionary_file(dir.path(), "subject_data_dict.csv", &sample_dictionary())
                .unwrap();

        assert_eq!(path, dir.path().join("subject_data_dict.csv"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 8);
    }

    #[test]
    fn test_invalid_file_name() {
        let dir = TempDir::new().unwrap();
        let result = write_dictionary_file(dir.path(), "", &sample_dictionary());
        assert!(matches!(result, Err(OutputError::InvalidFileName { .. })));
    }
}
