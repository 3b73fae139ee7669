//! Batch profiling of a snapshot's table exports.
//!
//! Each table is profiled independently: a table that cannot be read or
//! written produces a diagnostic and no file, and the batch moves on.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{info, info_span, warn};

use acrdd_infer::{DictionaryBuilder, InferError};
use acrdd_ingest::{ExportDirectory, IngestError, RowSource, SchemaSource, discover_table_exports};
use acrdd_model::{DataDictionary, ProfileOptions, SnapshotSchema, TableSchema};
use acrdd_output::{ensure_output_dir, write_dictionary_file};

use crate::types::{BatchReport, TableOutcome, TableReport};

/// Error from profiling a single table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Infer(#[from] InferError),
}

impl TableError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Infer(InferError::Cancelled { .. }))
    }
}

/// Materializes one table and builds its data dictionary.
///
/// A table the schema source does not declare is profiled with every
/// column unknown.
pub fn profile_table<R, S, F>(
    rows: &R,
    schemas: &S,
    table: &str,
    builder: &DictionaryBuilder,
    should_stop: F,
) -> std::result::Result<DataDictionary, TableError>
where
    R: RowSource + ?Sized,
    S: SchemaSource + ?Sized,
    F: Fn() -> bool,
{
    let data = rows.rows(table)?;
    let schema = match schemas.table_schema(table) {
        Ok(schema) => schema,
        Err(IngestError::TableNotDeclared { .. }) => TableSchema::new(table, Vec::new()),
        Err(error) => return Err(error.into()),
    };
    Ok(builder.build_until(&schema, &data, should_stop)?)
}

/// Profiles every selected table of `snapshot` found in `export_dir` and
/// writes one dictionary per table into `output_dir`.
///
/// Only directory-level failures are returned as errors; table failures are
/// recorded in the report.
pub fn profile_snapshot<F>(
    snapshot: &SnapshotSchema,
    export_dir: &Path,
    output_dir: &Path,
    options: &ProfileOptions,
    should_stop: F,
) -> Result<BatchReport>
where
    F: Fn() -> bool,
{
    let discovery = discover_table_exports(export_dir, snapshot)
        .with_context(|| format!("discover exports in {}", export_dir.display()))?;
    let rows = ExportDirectory::from_discovery(export_dir, &discovery);
    ensure_output_dir(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;

    let builder = DictionaryBuilder::new(options.enumeration_threshold);
    let mut report = BatchReport {
        snapshot: snapshot.name.clone(),
        output_dir: output_dir.to_path_buf(),
        ..BatchReport::default()
    };

    // Explicitly requested tables without an export are failures, not just missing.
    if options.tables.is_empty() {
        report.missing = discovery.missing.clone();
    }
    for requested in &options.tables {
        if discovery.export(requested).is_none() {
            warn!(table = %requested, "requested table has no export");
            let declared = snapshot.table(requested).is_some();
            report.tables.push(TableReport::failed(
                requested.clone(),
                declared,
                IngestError::ExportNotFound {
                    table: requested.clone(),
                },
            ));
        }
    }

    for export in &discovery.exports {
        if !options.includes_table(&export.table) {
            continue;
        }
        if should_stop() {
            report.cancelled = true;
            break;
        }

        let span = info_span!("table", table = %export.table);
        let _guard = span.enter();
        let declared = export.schema.is_some();
        let started = Instant::now();

        let dictionary =
            match profile_table(&rows, snapshot, &export.table, &builder, &should_stop) {
                Ok(dictionary) => dictionary,
                Err(error) => {
                    warn!(%error, "table not profiled");
                    let cancelled = error.is_cancelled();
                    report
                        .tables
                        .push(TableReport::failed(export.table.clone(), declared, error));
                    if cancelled {
                        report.cancelled = true;
                        break;
                    }
                    continue;
                }
            };

        info!(
            columns = dictionary.len(),
            enumerated = dictionary.enumerated_count(),
            duration_ms = started.elapsed().as_millis() as u64,
            "table profiled"
        );

        let file_name = options.dictionary_file_name(&export.table);
        let outcome = match write_dictionary_file(output_dir, &file_name, &dictionary) {
            Ok(path) => TableOutcome::Written(path),
            Err(error) => {
                warn!(%error, "data dictionary not written");
                TableOutcome::Failed(error.to_string())
            }
        };
        report.tables.push(TableReport {
            table: export.table.clone(),
            declared,
            columns: dictionary.len(),
            enumerated: dictionary.enumerated_count(),
            outcome,
        });
    }

    info!(
        snapshot = %report.snapshot,
        written = report.written().count(),
        failed = report.failed().count(),
        missing = report.missing.len(),
        "profiling complete"
    );
    Ok(report)
}
