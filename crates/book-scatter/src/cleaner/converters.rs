//! Conversion of working columns to numeric values.

use crate::error::{Result, ScatterError};
use crate::types::ScatterField;
use crate::utils::{coerce_numeric, text_column};
use polars::prelude::*;

/// Coerce one working column to optional finite `f64` values.
///
/// Text columns go through [`coerce_numeric`]; already-numeric columns
/// (the derived blurb length, or a re-cleaned table) are cast to `Float64`
/// with nulls and non-finite values mapped to `None`.
pub(crate) fn coerce_field(df: &DataFrame, field: ScatterField) -> Result<Vec<Option<f64>>> {
    let name = field.working_column();
    let column = df
        .column(name)
        .map_err(|_| ScatterError::Parse(format!("working column '{}' not found", name)))?;

    if column.dtype() == &DataType::String {
        return Ok(text_column(df, name)?
            .into_iter()
            .map(coerce_numeric)
            .collect());
    }

    let floats = column.as_materialized_series().cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_text_field() {
        let df = df![
            "pages_val" => [Some("412"), Some(" 12 "), Some("lots"), None, Some("")],
        ]
        .unwrap();

        let values = coerce_field(&df, ScatterField::Pages).unwrap();
        assert_eq!(values, vec![Some(412.0), Some(12.0), None, None, None]);
    }

    #[test]
    fn test_coerce_numeric_field() {
        let df = df![
            "blurb_len" => [Some(3.0), None, Some(f64::INFINITY), Some(120.0)],
        ]
        .unwrap();

        let values = coerce_field(&df, ScatterField::Blurb).unwrap();
        assert_eq!(values, vec![Some(3.0), None, None, Some(120.0)]);
    }

    #[test]
    fn test_coerce_integer_field() {
        let df = df![
            "reviews_val" => [1i64, 2, 3],
        ]
        .unwrap();

        let values = coerce_field(&df, ScatterField::Reviews).unwrap();
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_coerce_missing_column() {
        let df = df!["other" => [1.0]].unwrap();
        assert!(coerce_field(&df, ScatterField::Rating).is_err());
    }
}
