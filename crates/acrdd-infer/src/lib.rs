//! Data dictionary inference engine.
//!
//! Takes a table's materialized rows (a Polars [`DataFrame`](polars::prelude::DataFrame))
//! plus its declared [`TableSchema`](acrdd_model::TableSchema) and produces one
//! [`ColumnProfile`](acrdd_model::ColumnProfile) per column:
//!
//! 1. [`mapper`]: column name to declared attributes, built once per table
//! 2. [`classify`]: effective type and enumeration detection
//! 3. [`range`]: min/max for scalar numeric columns
//! 4. [`builder`]: orchestration across the columns of a table
//!
//! The engine performs no I/O.
//!
//! # Example
//!
//! ```ignore
//! use acrdd_infer::DictionaryBuilder;
//! use acrdd_model::EnumerationThreshold;
//!
//! let builder = DictionaryBuilder::new(EnumerationThreshold::new(50)?);
//! let dictionary = builder.build(&table_schema, &df);
//! ```

pub mod builder;
pub mod classify;
mod error;
pub mod mapper;
pub mod range;

pub use builder::DictionaryBuilder;
pub use classify::{Classification, ColumnStats, classify_column, column_stats};
pub use error::{InferError, Result};
pub use mapper::{ColumnAttributes, SchemaLookup};
pub use range::numeric_range;
