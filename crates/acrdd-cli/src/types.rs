use std::path::PathBuf;

use acrdd_model::{SnapshotDetail, StudyDetails};

/// Result of profiling every selected table of a snapshot.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub snapshot: String,
    pub output_dir: PathBuf,
    pub tables: Vec<TableReport>,
    /// Declared tables with no export in the directory.
    pub missing: Vec<String>,
    /// Set when profiling stopped before every table was processed.
    pub cancelled: bool,
}

impl BatchReport {
    pub fn has_errors(&self) -> bool {
        self.cancelled || self.tables.iter().any(TableReport::is_failed)
    }

    pub fn written(&self) -> impl Iterator<Item = &TableReport> {
        self.tables.iter().filter(|table| !table.is_failed())
    }

    pub fn failed(&self) -> impl Iterator<Item = &TableReport> {
        self.tables.iter().filter(|table| table.is_failed())
    }
}

#[derive(Debug)]
pub struct TableReport {
    pub table: String,
    /// False when the export had no declared schema.
    pub declared: bool,
    pub columns: usize,
    pub enumerated: usize,
    pub outcome: TableOutcome,
}

impl TableReport {
    pub fn failed(table: impl Into<String>, declared: bool, error: impl ToString) -> Self {
        Self {
            table: table.into(),
            declared,
            columns: 0,
            enumerated: 0,
            outcome: TableOutcome::Failed(error.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, TableOutcome::Failed(_))
    }
}

#[derive(Debug)]
pub enum TableOutcome {
    /// Dictionary written to this path.
    Written(PathBuf),
    /// No file written; the diagnostic explains why.
    Failed(String),
}

/// Consent index search matches and the summaries written for them.
#[derive(Debug, Default)]
pub struct SearchResult {
    pub query: String,
    pub studies: Vec<StudyDetails>,
    pub summaries: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ReconcileResult {
    pub snapshots: Vec<SnapshotDetail>,
}

impl ReconcileResult {
    pub fn registered_count(&self) -> usize {
        self.snapshots.iter().filter(|s| s.in_duos).count()
    }
}

/// Archive XML files converted to CSV.
#[derive(Debug, Default)]
pub struct ArchiveResult {
    pub output_dir: PathBuf,
    pub files: Vec<ArchiveFileReport>,
}

impl ArchiveResult {
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|file| file.outcome.is_err())
    }
}

#[derive(Debug)]
pub struct ArchiveFileReport {
    pub source: PathBuf,
    pub variables: usize,
    pub outcome: std::result::Result<PathBuf, String>,
}
