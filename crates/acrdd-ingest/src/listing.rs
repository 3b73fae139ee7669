//! Repository snapshot listing and consent reconciliation.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use acrdd_model::{ConsentRecord, SnapshotDetail, SnapshotSummary, snapshot_id_from_url};

use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
struct ListingDocument {
    #[serde(default)]
    items: Vec<SnapshotSummary>,
}

/// Parses a snapshot listing into snapshots keyed by name.
///
/// Names must be unique across the listing.
pub fn parse_snapshot_listing(json: &str, path: &Path) -> Result<BTreeMap<String, SnapshotDetail>> {
    let doc: ListingDocument = serde_json::from_str(json).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut snapshots = BTreeMap::new();
    for summary in doc.items {
        if snapshots.contains_key(&summary.name) {
            return Err(IngestError::DuplicateSnapshot { name: summary.name });
        }
        snapshots.insert(summary.name.clone(), SnapshotDetail::from(summary));
    }
    Ok(snapshots)
}

/// Loads a snapshot listing from disk.
pub fn load_snapshot_listing(path: &Path) -> Result<BTreeMap<String, SnapshotDetail>> {
    let json = fs::read_to_string(path).map_err(|e| IngestError::file(path, e))?;
    let snapshots = parse_snapshot_listing(&json, path)?;
    tracing::debug!(path = %path.display(), snapshots = snapshots.len(), "loaded snapshot listing");
    Ok(snapshots)
}

/// Marks snapshots referenced by a consent record and attaches its terms.
///
/// Records are matched by the snapshot id in their repository URL. When
/// several records point at one snapshot the last one wins.
pub fn reconcile(
    mut snapshots: BTreeMap<String, SnapshotDetail>,
    consent: &[ConsentRecord],
) -> Vec<SnapshotDetail> {
    let by_id: HashMap<String, &ConsentRecord> = consent
        .iter()
        .filter_map(|record| snapshot_id_from_url(&record.url).map(|id| (id, record)))
        .collect();

    for snapshot in snapshots.values_mut() {
        if let Some(record) = by_id.get(&snapshot.id) {
            snapshot.add_duos(record.dataset_identifier.clone(), record.data_use.clone());
        }
    }

    let details: Vec<SnapshotDetail> = snapshots.into_values().collect();
    let registered = details.iter().filter(|detail| detail.in_duos).count();
    tracing::info!(
        snapshots = details.len(),
        registered,
        repository_only = details.len() - registered,
        "reconciled snapshot listing"
    );
    details
}
