//! Table export loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use polars::prelude::{
    BooleanChunked, Column, CsvReadOptions, DataFrame, Float64Chunked, Int64Chunked, IntoColumn,
    NewChunkedArray, PolarsResult, SerReader, StringChunked,
};
use regex::Regex;

use crate::error::{IngestError, Result};

/// Rejects UTF-16 exports, which the CSV reader cannot parse.
///
/// A UTF-8 BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::file(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file
        .read(&mut buffer)
        .map_err(|e| IngestError::file(path, e))?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

/// Checks that every column has a name.
pub fn validate_columns(df: &DataFrame, path: &Path) -> Result<()> {
    if df
        .get_column_names()
        .iter()
        .any(|name| name.trim().is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }

    if df.width() > 500 {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "export has more than 500 columns"
        );
    }

    Ok(())
}

static INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("Invalid integer regex"));

/// Reads a table export (header row + data rows) into a DataFrame.
///
/// The schema is inferred from every row so a column containing any
/// floating value is typed float throughout. Empty cells become nulls.
///
/// When a cell does not fit its inferred dtype (an integer beyond `i64`),
/// the export is re-read as text and each column is typed on its own, so
/// only the offending column stays text.
pub fn read_table_export(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;

    let df = match read_csv(path, None) {
        Ok(df) => df,
        Err(error) => {
            let parse_error = |_| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: error.to_string(),
            };
            let text = read_csv(path, Some(0)).map_err(parse_error)?;
            tracing::warn!(
                path = %path.display(),
                "inferred column types do not hold, typing columns individually"
            );
            retype_text_columns(&text).map_err(parse_error)?
        }
    };

    validate_columns(&df, path)?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded table export"
    );
    Ok(df)
}

/// `infer_schema_length` of `Some(0)` reads every column as text.
fn read_csv(path: &Path, infer_schema_length: Option<usize>) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

fn retype_text_columns(df: &DataFrame) -> PolarsResult<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(retype_text_column)
        .collect::<PolarsResult<Vec<_>>>()?;
    DataFrame::new(columns)
}

/// Types a text column as integer, float or boolean when every present
/// value parses. Integer-shaped values outside `i64` keep the column text.
fn retype_text_column(column: &Column) -> PolarsResult<Column> {
    let values = column.str()?;
    let name = column.name().clone();
    let mut present = values.iter().flatten().peekable();
    if present.peek().is_none() {
        return Ok(column.clone());
    }

    if let Ok(parsed) = parse_all::<i64>(values) {
        return Ok(Int64Chunked::from_iter_options(name, parsed.into_iter()).into_column());
    }
    if values.iter().flatten().all(|value| INTEGER_REGEX.is_match(value)) {
        tracing::warn!(column = %name, "integer column exceeds 64 bits, kept as text");
        return Ok(column.clone());
    }
    if let Ok(parsed) = parse_all::<f64>(values) {
        return Ok(Float64Chunked::from_iter_options(name, parsed.into_iter()).into_column());
    }
    if values.iter().flatten().all(is_boolean_text) {
        let parsed = values
            .iter()
            .map(|value| value.map(|value| value.eq_ignore_ascii_case("true")));
        return Ok(BooleanChunked::from_iter_options(name, parsed).into_column());
    }
    Ok(column.clone())
}

fn parse_all<T: FromStr>(values: &StringChunked) -> std::result::Result<Vec<Option<T>>, T::Err> {
    values
        .iter()
        .map(|value| value.map(str::parse::<T>).transpose())
        .collect()
}

fn is_boolean_text(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}
