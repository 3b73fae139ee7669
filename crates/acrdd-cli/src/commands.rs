use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use acrdd_cli::pipeline::profile_snapshot;
use acrdd_cli::types::{
    ArchiveFileReport, ArchiveResult, BatchReport, ReconcileResult, SearchResult,
};
use acrdd_ingest::{
    load_archive_dictionary, load_consent_index, load_snapshot_listing, load_snapshot_schema,
    reconcile, search_by_title, study_summary_file_name,
};
use acrdd_model::{EnumerationThreshold, ProfileOptions, StudyDetails};
use acrdd_output::{ensure_output_dir, write_archive_file, write_study_summary};

use crate::cli::{DbgapArgs, ProfileArgs, ReconcileArgs, SearchArgs};

pub fn run_profile(args: &ProfileArgs) -> Result<BatchReport> {
    let snapshot = load_snapshot_schema(&args.schema)
        .with_context(|| format!("load schema {}", args.schema.display()))?;
    let span = info_span!("snapshot", snapshot = %snapshot.name);
    let _guard = span.enter();

    let threshold = EnumerationThreshold::new(args.enumeration_threshold)?;
    let options = ProfileOptions::new()
        .with_threshold(threshold)
        .with_tables(args.tables.clone());
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.export_dir.join("data_dicts"));

    info!(
        threshold = threshold.percent(),
        output_dir = %output_dir.display(),
        "profiling snapshot"
    );
    profile_snapshot(&snapshot, &args.export_dir, &output_dir, &options, || false)
}

pub fn run_search(args: &SearchArgs) -> Result<SearchResult> {
    let records = load_consent_index(&args.index)
        .with_context(|| format!("load consent index {}", args.index.display()))?;
    let studies: Vec<StudyDetails> = search_by_title(&records, &args.query)
        .into_iter()
        .map(StudyDetails::from)
        .collect();

    let mut summaries = Vec::new();
    if let Some(dir) = &args.output_dir {
        ensure_output_dir(dir).with_context(|| format!("create {}", dir.display()))?;
        for study in &studies {
            let file_name = study_summary_file_name(&study.study_name);
            let path = write_study_summary(dir, &file_name, study)
                .with_context(|| format!("write summary for {}", study.study_name))?;
            summaries.push(path);
        }
    }

    Ok(SearchResult {
        query: args.query.clone(),
        studies,
        summaries,
    })
}

pub fn run_reconcile(args: &ReconcileArgs) -> Result<ReconcileResult> {
    let records = load_consent_index(&args.index)
        .with_context(|| format!("load consent index {}", args.index.display()))?;
    let listing = load_snapshot_listing(&args.listing)
        .with_context(|| format!("load snapshot listing {}", args.listing.display()))?;
    Ok(ReconcileResult {
        snapshots: reconcile(listing, &records),
    })
}

/// Converts each archive file independently; one bad file does not stop the rest.
pub fn run_dbgap(args: &DbgapArgs) -> Result<ArchiveResult> {
    ensure_output_dir(&args.output_dir)
        .with_context(|| format!("create {}", args.output_dir.display()))?;

    let mut result = ArchiveResult {
        output_dir: args.output_dir.clone(),
        files: Vec::new(),
    };
    for source in &args.files {
        let report = match load_archive_dictionary(source) {
            Ok(dictionary) => ArchiveFileReport {
                source: source.clone(),
                variables: dictionary.variables.len(),
                outcome: write_archive_file(&args.output_dir, source, &dictionary)
                    .map_err(|error| error.to_string()),
            },
            Err(error) => ArchiveFileReport {
                source: source.clone(),
                variables: 0,
                outcome: Err(error.to_string()),
            },
        };
        if let Err(error) = &report.outcome {
            warn!(source = %source.display(), %error, "archive dictionary not converted");
        }
        result.files.push(report);
    }
    Ok(result)
}
