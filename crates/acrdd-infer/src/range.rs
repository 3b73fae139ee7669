//! Min/max extraction for scalar numeric columns.

use polars::prelude::{Column, PolarsResult};

use acrdd_model::{ColumnType, NumericBound, NumericRange};

/// Computes the numeric range of a column.
///
/// Only scalar `integer` and `float` effective types get a range. Bounds
/// follow the physical dtype of the data: integer columns give integer
/// bounds, float columns give float bounds. A column with no non-missing
/// values, or whose data is not physically numeric, has no range.
pub fn numeric_range(column: &Column, column_type: ColumnType) -> PolarsResult<Option<NumericRange>> {
    let Some(scalar) = column_type.scalar() else {
        return Ok(None);
    };
    if !scalar.is_numeric() {
        return Ok(None);
    }

    let series = column.as_materialized_series();
    let dtype = series.dtype();
    let range = if dtype.is_integer() {
        match (series.min::<i64>()?, series.max::<i64>()?) {
            (Some(min), Some(max)) => Some(NumericRange {
                min: NumericBound::Integer(min),
                max: NumericBound::Integer(max),
            }),
            _ => None,
        }
    } else if dtype.is_float() {
        match (series.min::<f64>()?, series.max::<f64>()?) {
            (Some(min), Some(max)) => Some(NumericRange {
                min: NumericBound::Float(min),
                max: NumericBound::Float(max),
            }),
            _ => None,
        }
    } else {
        tracing::debug!(
            column = %column.name(),
            dtype = %dtype,
            "numeric column has non-numeric data, range left empty"
        );
        None
    };
    Ok(range)
}
