//! Data model for study data dictionaries.
//!
//! - [`types`]: declared and effective column types
//! - [`schema`]: table schemas declared by the cloud data repository
//! - [`profile`]: per-column profiles and data dictionaries
//! - [`options`]: profiling configuration
//! - [`registry`]: consent index, repository listing, and archive records

pub mod error;
pub mod options;
pub mod profile;
pub mod registry;
pub mod schema;
pub mod types;

pub use error::{ModelError, Result};
pub use options::{
    DEFAULT_DICTIONARY_SUFFIX, DEFAULT_ENUMERATION_THRESHOLD, EnumerationThreshold,
    ProfileOptions,
};
pub use profile::{
    BOOLEAN_ENUMERATION, ColumnProfile, DataDictionary, ENUMERATION_SEPARATOR, NumericBound,
    NumericRange,
};
pub use registry::{
    ArchiveDictionary, ArchiveVariable, CodedValue, ConsentRecord, ConsentStudy,
    SnapshotDetail, SnapshotSummary, StudyDetails, snapshot_id_from_url,
};
pub use schema::{ColumnSchema, SnapshotSchema, TableSchema};
pub use types::{ColumnType, DeclaredType};
