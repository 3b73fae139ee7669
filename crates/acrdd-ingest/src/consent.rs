//! Consent index loading and study search.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use acrdd_model::ConsentRecord;

use crate::error::{IngestError, Result};

static NON_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("Invalid non-word regex"));

static WHITESPACE_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Parses a consent index export (a JSON array of study records).
pub fn parse_consent_index(json: &str, path: &Path) -> Result<Vec<ConsentRecord>> {
    serde_json::from_str(json).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a consent index export from disk.
pub fn load_consent_index(path: &Path) -> Result<Vec<ConsentRecord>> {
    let json = fs::read_to_string(path).map_err(|e| IngestError::file(path, e))?;
    let records = parse_consent_index(&json, path)?;
    tracing::debug!(path = %path.display(), studies = records.len(), "loaded consent index");
    Ok(records)
}

/// Finds studies whose name contains `query`, ignoring case.
///
/// The query is matched literally; regex metacharacters carry no meaning.
/// An empty query matches every study.
pub fn search_by_title<'a>(records: &'a [ConsentRecord], query: &str) -> Vec<&'a ConsentRecord> {
    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(error) => {
            tracing::warn!(%query, %error, "search query rejected");
            return Vec::new();
        }
    };

    let matches: Vec<&ConsentRecord> = records
        .iter()
        .filter(|record| pattern.is_match(&record.study.study_name))
        .collect();
    tracing::info!(%query, matches = matches.len(), "searched consent index");
    matches
}

/// File name for a study summary: punctuation dropped, whitespace runs to `_`.
pub fn study_summary_file_name(study_name: &str) -> String {
    let cleaned = NON_WORD_REGEX.replace_all(study_name.trim(), "");
    let joined = WHITESPACE_RUN_REGEX.replace_all(&cleaned, "_");
    format!("{joined}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_JSON: &str = r#"[
        {
            "datasetIdentifier": "DUOS-000123",
            "datasetName": "CMG Broad Muscle",
            "url": "https://data.terra.bio/snapshots/85b0b351-cd0a",
            "accessManagement": "controlled",
            "dataUse": {"primary": [{"code": "GRU"}]},
            "study": {
                "studyName": "Center for Mendelian Genomics (Broad): Muscle",
                "description": "Rare muscle disease exomes",
                "phsId": "phs000693",
                "phenotype": "Neuromuscular disease",
                "species": "Human",
                "piName": "Jane Doe",
                "dataTypes": ["Exome"]
            }
        },
        {
            "datasetIdentifier": "DUOS-000456",
            "datasetName": "Heart cohort",
            "url": "",
            "study": {"studyName": "Cardiac (c.*) cohort"}
        }
    ]"#;

    fn records() -> Vec<ConsentRecord> {
        parse_consent_index(INDEX_JSON, Path::new("index.json")).unwrap()
    }

    #[test]
    fn test_parse_fills_missing_fields_with_defaults() {
        let records = records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].study.phs_id, "phs000693");
        assert_eq!(records[0].study.data_types, vec!["Exome".to_string()]);
        assert_eq!(records[1].access_management, "");
        assert!(records[1].data_use.is_null());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = records();
        let found = search_by_title(&records, "mendelian GENOMICS");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].dataset_identifier, "DUOS-000123");
    }

    #[test]
    fn test_search_is_literal() {
        let records = records();
        assert_eq!(search_by_title(&records, "(c.*)").len(), 1);
        assert!(search_by_title(&records, "c.*x").is_empty());
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let records = records();
        assert_eq!(search_by_title(&records, "").len(), 2);
    }

    #[test]
    fn test_study_summary_file_name() {
        assert_eq!(
            study_summary_file_name("Center for Mendelian Genomics (Broad): Muscle"),
            "Center_for_Mendelian_Genomics_Broad_Muscle.txt"
        );
        assert_eq!(study_summary_file_name("  a-b   c "), "a-b_c.txt");
    }

    #[test]
    fn test_load_missing_index() {
        let result = load_consent_index(Path::new("/nonexistent/index.json"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
