//! Records from the three federated registries: the consent index, the cloud
//! data repository, and the genotype/phenotype archive.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path marker preceding the snapshot id in repository URLs.
const SNAPSHOT_URL_MARKER: &str = "snapshots/";

/// One study entry of the consent index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsentRecord {
    pub dataset_identifier: String,
    pub dataset_name: String,
    /// Repository URL, e.g. `https://data.terra.bio/snapshots/<id>`.
    pub url: String,
    pub access_management: String,
    pub data_use: Value,
    pub study: ConsentStudy,
}

/// Study block nested in a consent record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsentStudy {
    pub study_name: String,
    pub description: String,
    pub phs_id: String,
    pub phenotype: String,
    pub species: String,
    pub pi_name: String,
    pub data_types: Vec<String>,
}

/// Flattened study details with identifiers reconciled across registries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyDetails {
    pub dataset_identifier: String,
    pub dataset_name: String,
    pub repository_url: String,
    /// Snapshot id parsed from the repository URL.
    pub snapshot_id: Option<String>,
    pub access_management: String,
    pub data_use: Value,
    pub study_name: String,
    pub study_description: String,
    /// Archive accession (`phs...`), empty when the study has none.
    pub phs_id: String,
    pub phenotype: String,
    pub species: String,
    pub pi_name: String,
    pub data_types: Vec<String>,
}

impl From<&ConsentRecord> for StudyDetails {
    fn from(record: &ConsentRecord) -> Self {
        Self {
            dataset_identifier: record.dataset_identifier.clone(),
            dataset_name: record.dataset_name.clone(),
            repository_url: record.url.clone(),
            snapshot_id: snapshot_id_from_url(&record.url),
            access_management: record.access_management.clone(),
            data_use: record.data_use.clone(),
            study_name: record.study.study_name.clone(),
            study_description: record.study.description.clone(),
            phs_id: record.study.phs_id.clone(),
            phenotype: record.study.phenotype.clone(),
            species: record.study.species.clone(),
            pi_name: record.study.pi_name.clone(),
            data_types: record.study.data_types.clone(),
        }
    }
}

impl StudyDetails {
    pub fn has_phs_id(&self) -> bool {
        !self.phs_id.trim().is_empty()
    }
}

/// Extracts the snapshot id following the last `snapshots/` in a URL.
pub fn snapshot_id_from_url(url: &str) -> Option<String> {
    let (_, tail) = url.rsplit_once(SNAPSHOT_URL_MARKER)?;
    let id = tail.trim_end_matches('/');
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// A snapshot as listed by the repository's enumerate endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "phsId")]
    pub phs_id: Option<String>,
    #[serde(rename = "duosId")]
    pub duos_id: Option<String>,
}

/// Snapshot listing enriched with consent information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotDetail {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub phs_id: Option<String>,
    pub duos_id: Option<String>,
    pub in_duos: bool,
    pub data_use: Option<Value>,
}

impl From<SnapshotSummary> for SnapshotDetail {
    fn from(summary: SnapshotSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            description: summary.description,
            phs_id: summary.phs_id,
            duos_id: summary.duos_id,
            in_duos: false,
            data_use: None,
        }
    }
}

impl SnapshotDetail {
    /// Records the consent identifier and data-use terms for this snapshot.
    pub fn add_duos(&mut self, duos_id: impl Into<String>, data_use: Value) {
        self.duos_id = Some(duos_id.into());
        self.in_duos = true;
        self.data_use = Some(data_use);
    }
}

/// A coded value of an archive variable (`<value code="1">Male</value>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodedValue {
    pub code: Option<String>,
    pub text: String,
}

impl CodedValue {
    /// `code=text`, or just `text` when there is no code.
    pub fn render(&self) -> String {
        match self.code.as_deref().filter(|code| !code.is_empty()) {
            Some(code) => format!("{code}={}", self.text),
            None => self.text.clone(),
        }
    }
}

/// One variable of an archive data dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveVariable {
    /// Archive variable accession (`phv...`).
    pub id: String,
    pub name: String,
    pub description: String,
    pub var_type: String,
    pub unit: String,
    pub logical_min: String,
    pub logical_max: String,
    pub values: Vec<CodedValue>,
    pub comment: String,
}

impl ArchiveVariable {
    /// Coded values joined with `"; "`.
    pub fn enumerations(&self) -> String {
        self.values
            .iter()
            .map(CodedValue::render)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// An archive data dictionary (one `*.data_dict.xml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveDictionary {
    /// Table accession (`pht...`).
    pub table_id: String,
    pub study_id: String,
    pub variables: Vec<ArchiveVariable>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_id_parsed_from_repository_url() {
        assert_eq!(
            snapshot_id_from_url("https://data.terra.bio/snapshots/85b0b351-cd0a"),
            Some("85b0b351-cd0a".to_string())
        );
        assert_eq!(
            snapshot_id_from_url("https://data.terra.bio/snapshots/abc/"),
            Some("abc".to_string())
        );
        assert_eq!(snapshot_id_from_url("https://example.org/datasets/1"), None);
        assert_eq!(snapshot_id_from_url("https://data.terra.bio/snapshots/"), None);
    }

    #[test]
    fn consent_record_flattens_to_details() {
        let record: ConsentRecord = serde_json::from_value(serde_json::json!({
            "datasetIdentifier": "DUOS-000234",
            "datasetName": "ANVIL_ALS_FTD_GRU_v1",
            "url": "https://data.terra.bio/snapshots/snap-1",
            "dataUse": {"primary": [{"code": "GRU"}]},
            "study": {"studyName": "ALS Study", "phsId": "phs001234"}
        }))
        .unwrap();
        let details = StudyDetails::from(&record);
        assert_eq!(details.snapshot_id.as_deref(), Some("snap-1"));
        assert_eq!(details.study_name, "ALS Study");
        assert!(details.has_phs_id());
        assert!(details.data_types.is_empty());
        assert_eq!(details.data_use["primary"][0]["code"], "GRU");
    }

    #[test]
    fn add_duos_marks_snapshot() {
        let mut detail = SnapshotDetail::from(SnapshotSummary {
            id: "snap-1".to_string(),
            name: "ANVIL_TEST".to_string(),
            ..SnapshotSummary::default()
        });
        assert!(!detail.in_duos);
        detail.add_duos("DUOS-1", serde_json::json!({"primary": []}));
        assert!(detail.in_duos);
        assert_eq!(detail.duos_id.as_deref(), Some("DUOS-1"));
    }

    #[test]
    fn archive_enumerations_join_codes() {
        let variable = ArchiveVariable {
            values: vec![
                CodedValue {
                    code: Some("1".to_string()),
                    text: "Male".to_string(),
                },
                CodedValue {
                    code: None,
                    text: "Unknown".to_string(),
                },
            ],
            ..ArchiveVariable::default()
        };
        assert_eq!(variable.enumerations(), "1=Male; Unknown");
    }
}
