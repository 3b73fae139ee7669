//! CLI library components for the data dictionary builder.

pub mod logging;
pub mod pipeline;
pub mod types;
