//! Archive data dictionary CSV output.

use std::io::Write;
use std::path::{Path, PathBuf};

use acrdd_model::ArchiveDictionary;

use crate::atomic::write_atomic;
use crate::error::{OutputError, Result};

/// Column headers of a converted archive dictionary, in order.
pub const ARCHIVE_HEADERS: [&str; 9] = [
    "variable_name",
    "description",
    "type",
    "min",
    "max",
    "units",
    "enumerations",
    "comment",
    "dbgap_id",
];

/// Writes one row per archive variable.
pub fn write_archive_dictionary<W: Write>(dictionary: &ArchiveDictionary, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(ARCHIVE_HEADERS)?;

    for variable in &dictionary.variables {
        let enumerations = variable.enumerations();
        csv.write_record([
            variable.name.as_str(),
            variable.description.as_str(),
            variable.var_type.as_str(),
            variable.logical_min.as_str(),
            variable.logical_max.as_str(),
            variable.unit.as_str(),
            enumerations.as_str(),
            variable.comment.as_str(),
            variable.id.as_str(),
        ])?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Output name for an archive XML file: `.xml` replaced by `.csv`.
pub fn archive_csv_file_name(xml_path: &Path) -> Result<String> {
    let name = xml_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| OutputError::InvalidFileName {
            name: xml_path.display().to_string(),
        })?;
    Ok(match name.strip_suffix(".xml") {
        Some(stem) => format!("{stem}.csv"),
        None => format!("{name}.csv"),
    })
}

/// Converts an archive dictionary into `<dir>/<xml name with .csv>`.
pub fn write_archive_file(
    dir: &Path,
    xml_path: &Path,
    dictionary: &ArchiveDictionary,
) -> Result<PathBuf> {
    let mut buffer = Vec::new();
    write_archive_dictionary(dictionary, &mut buffer)?;

    let path = dir.join(archive_csv_file_name(xml_path)?);
    write_atomic(&path, &buffer)?;
    tracing::info!(
        table = %dictionary.table_id,
        variables = dictionary.variables.len(),
        path = %path.display(),
        "wrote archive dictionary"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acrdd_model::{ArchiveVariable, CodedValue};
    use tempfile::TempDir;

    fn dictionary() -> ArchiveDictionary {
        ArchiveDictionary {
            table_id: "pht003099.v4".to_string(),
            study_id: "phs000693.v4".to_string(),
            variables: vec![
                ArchiveVariable {
                    id: "phv00171412.v4".to_string(),
                    name: "SEX".to_string(),
                    description: "Sex of participant".to_string(),
                    var_type: "encoded value".to_string(),
                    values: vec![
                        CodedValue {
                            code: Some("1".to_string()),
                            text: "Male".to_string(),
                        },
                        CodedValue {
                            code: Some("2".to_string()),
                            text: "Female".to_string(),
                        },
                    ],
                    ..ArchiveVariable::default()
                },
                ArchiveVariable {
                    id: "phv00171413.v4".to_string(),
                    name: "AGE".to_string(),
                    var_type: "integer".to_string(),
                    unit: "years".to_string(),
                    logical_min: "18".to_string(),
                    logical_max: "90".to_string(),
                    ..ArchiveVariable::default()
                },
            ],
        }
    }

    #[test]
    fn test_archive_csv_rows() {
        let mut buffer = Vec::new();
        write_archive_dictionary(&dictionary(), &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        insta::assert_snapshot!(csv, @r"
        variable_name,description,type,min,max,units,enumerations,comment,dbgap_id
        SEX,Sex of participant,encoded value,,,,1=Male; 2=Female,,phv00171412.v4
        AGE,,integer,18,90,years,,,phv00171413.v4
        ");
    }

    #[test]
    fn test_archive_csv_file_name() {
        assert_eq!(
            archive_csv_file_name(Path::new("/tmp/phs000693.v4.pht003099.v4.Subject.data_dict.xml"))
                .unwrap(),
            "phs000693.v4.pht003099.v4.Subject.data_dict.csv"
        );
        assert_eq!(archive_csv_file_name(Path::new("dict")).unwrap(), "dict.csv");
    }

    #[test]
    fn test_write_archive_file() {
        let dir = TempDir::new().unwrap();
        let path = write_archive_file(dir.path(), Path::new("t.data_dict.xml"), &dictionary()).unwrap();
        assert_eq!(path, dir.path().join("t.data_dict.csv"));
        assert!(std::fs::read_to_string(path).unwrap().contains("phv00171413.v4"));
    }
}
