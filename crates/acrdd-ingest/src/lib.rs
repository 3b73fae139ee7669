//! Registry ingestion.
//!
//! Reads the local artifacts the inference engine works from:
//!
//! - **Table Exports**: `<table>.csv` files loaded into Polars DataFrames
//! - **Sources**: [`RowSource`] and [`SchemaSource`] seams for the inference engine
//! - **Snapshot Schemas**: repository snapshot/dataset JSON documents
//! - **Consent Index**: study records, searchable by title
//! - **Snapshot Listings**: repository listings reconciled against consent records
//! - **Archive Dictionaries**: `*.data_dict.xml` variable definitions
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use acrdd_ingest::{ExportDirectory, RowSource, SchemaSource, load_snapshot_schema};
//!
//! let schema = load_snapshot_schema(Path::new("snapshot.json"))?;
//! let exports = ExportDirectory::open(Path::new("exports"))?;
//! for table in exports.tables() {
//!     let df = exports.rows(table)?;
//!     let declared = schema.table_schema(table);
//! }
//! ```

mod archive;
mod consent;
mod csv;
mod discovery;
mod error;
mod listing;
mod schema;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Table Exports ===
pub use csv::{read_table_export, validate_columns, validate_encoding};
pub use discovery::{ExportDiscovery, TableExport, discover_table_exports, list_csv_files};
pub use source::{ExportDirectory, RowSource, SchemaSource};

// === Registry Documents ===
pub use archive::{load_archive_dictionary, parse_archive_dictionary};
pub use consent::{
    load_consent_index, parse_consent_index, search_by_title, study_summary_file_name,
};
pub use listing::{load_snapshot_listing, parse_snapshot_listing, reconcile};
pub use schema::{load_snapshot_schema, parse_snapshot_schema};
