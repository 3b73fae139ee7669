//! Output generation for data dictionaries and registry reports.
//!
//! - **Data Dictionaries**: one CSV per table, written atomically
//! - **Archive Dictionaries**: archive XML variables flattened to CSV
//! - **Study Summaries**: plain-text blocks for consent search matches

mod archive;
mod atomic;
mod dictionary;
mod error;
mod summary;

pub use archive::{
    ARCHIVE_HEADERS, archive_csv_file_name, write_archive_dictionary, write_archive_file,
};
pub use atomic::{ensure_output_dir, write_atomic};
pub use dictionary::{
    DICTIONARY_HEADERS, data_dictionary_csv_string, write_data_dictionary, write_dictionary_file,
};
pub use error::{OutputError, Result};
pub use summary::{render_study_summary, write_study_summary};
