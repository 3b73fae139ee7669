//! Plain-text study summaries.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde_json::Value;

use acrdd_model::StudyDetails;

use crate::atomic::write_atomic;
use crate::error::Result;

/// Renders the summary block for one study.
pub fn render_study_summary(details: &StudyDetails) -> String {
    let data_use = match &details.data_use {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "=== Study ===");
    let _ = writeln!(out, "Study Name: {}", details.study_name);
    let _ = writeln!(out, "Dataset Name: {}", details.dataset_name);
    let _ = writeln!(
        out,
        "TDR ID: {}",
        details.snapshot_id.as_deref().unwrap_or_default()
    );
    let _ = writeln!(out, "dbGaP ID: {}", details.phs_id);
    let _ = writeln!(out, "access management: {}", details.access_management);
    let _ = writeln!(out, "data use: {data_use}");
    let _ = writeln!(out, "phenotype: {}", details.phenotype);
    let _ = writeln!(out, "species: {}", details.species);
    let _ = writeln!(out, "piName: {}", details.pi_name);
    out
}

/// Writes `<dir>/<file_name>` with the study's summary block.
pub fn write_study_summary(dir: &Path, file_name: &str, details: &StudyDetails) -> Result<PathBuf> {
    let path = dir.join(file_name);
    write_atomic(&path, render_study_summary(details).as_bytes())?;
    tracing::info!(study = %details.study_name, path = %path.display(), "wrote study summary");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acrdd_model::{ConsentRecord, ConsentStudy};
    use serde_json::json;

    fn details() -> StudyDetails {
        let record = ConsentRecord {
            dataset_identifier: "DUOS-000123".to_string(),
            dataset_name: "CMG Broad Muscle".to_string(),
            url: "https://data.terra.bio/snapshots/85b0b351-cd0a".to_string(),
            access_management: "controlled".to_string(),
            data_use: json!({"primary": [{"code": "GRU"}]}),
            study: ConsentStudy {
                study_name: "CMG Broad: Muscle".to_string(),
                phs_id: "phs000693".to_string(),
                phenotype: "Neuromuscular disease".to_string(),
                species: "Human".to_string(),
                pi_name: "Jane Doe".to_string(),
                ..ConsentStudy::default()
            },
        };
        StudyDetails::from(&record)
    }

    #[test]
    fn test_render_study_summary() {
        insta::assert_snapshot!(render_study_summary(&details()), @r#"
        === Study ===
        Study Name: CMG Broad: Muscle
        Dataset Name: CMG Broad Muscle
        TDR ID: 85b0b351-cd0a
        dbGaP ID: phs000693
        access management: controlled
        data use: {"primary":[{"code":"GRU"}]}
        phenotype: Neuromuscular disease
        species: Human
        piName: Jane Doe
        "#);
    }

    #[test]
    fn test_write_study_summary() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_study_summary(dir.path(), "CMG_Broad_Muscle.txt", &details()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("=== Study ===\n"));
    }
}
