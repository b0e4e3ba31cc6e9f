//! Data cleaning module.
//!
//! This module provides functionality for:
//! - Coercing the working columns to floating-point values
//! - Validating each row (all four fields present and finite)
//! - Dropping rows that fail validation

mod converters;
mod validation;

pub use validation::RowValidation;

use crate::error::Result;
use crate::types::ScatterField;
use polars::prelude::*;
use tracing::{debug, info};

/// Data cleaner for the working table.
pub struct DataCleaner;

impl DataCleaner {
    /// Coerce every field and keep only fully-numeric rows.
    ///
    /// Returns a table of four `Float64` columns named after
    /// [`ScatterField::working_column`].
    pub fn clean(df: &DataFrame) -> Result<DataFrame> {
        info!("Cleaning {} rows...", df.height());

        let (coerced, validation) = Self::validate(df)?;

        let columns: Vec<Column> = ScatterField::ALL
            .iter()
            .zip(coerced)
            .map(|(field, values)| {
                Series::new(field.working_column().into(), values).into_column()
            })
            .collect();
        let numeric = DataFrame::new(columns)?;

        let cleaned = numeric.filter(&validation.mask())?;

        if validation.fail_count() > 0 {
            let pct = (validation.fail_count() as f64 / validation.len() as f64) * 100.0;
            debug!(
                "Dropped {} rows with missing or non-numeric values ({:.1}%)",
                validation.fail_count(),
                pct
            );
        } else {
            debug!("No rows with missing values found");
        }

        info!("Cleaning complete: {} rows remain", cleaned.height());
        Ok(cleaned)
    }

    /// Coerce all fields and compute the per-row pass/fail decision.
    ///
    /// Coerced values are returned in [`ScatterField::ALL`] order.
    pub fn validate(df: &DataFrame) -> Result<(Vec<Vec<Option<f64>>>, RowValidation)> {
        let coerced = ScatterField::ALL
            .iter()
            .map(|field| converters::coerce_field(df, *field))
            .collect::<Result<Vec<_>>>()?;

        for (field, values) in ScatterField::ALL.iter().zip(&coerced) {
            let missing = values.iter().filter(|v| v.is_none()).count();
            if missing > 0 {
                debug!("'{}': {} missing values after coercion", field, missing);
            }
        }

        let validation = RowValidation::from_columns(&coerced);
        Ok((coerced, validation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn working() -> DataFrame {
        df![
            "pages_val" => [Some("412"), Some("abc"), Some("200"), None, Some("96")],
            "blurb_len" => [120.0, 3.0, 45.0, 80.0, 3.0],
            "reviews_val" => [Some("9001"), Some("10"), Some(""), Some("5"), Some("0")],
            "rating_val" => [Some("4.25"), Some("3.0"), Some("4.0"), Some("2.5"), Some("5")],
        ]
        .unwrap()
    }

    #[test]
    fn test_clean_drops_incomplete_rows() {
        let cleaned = DataCleaner::clean(&working()).unwrap();

        // rows 1 (bad pages), 2 (empty reviews), 3 (null pages) are dropped
        assert_eq!(cleaned.height(), 2);

        let pages = cleaned.column("pages_val").unwrap();
        let pages = pages.as_materialized_series().f64().unwrap();
        assert_eq!(pages.get(0), Some(412.0));
        assert_eq!(pages.get(1), Some(96.0));
    }

    #[test]
    fn test_clean_output_is_float() {
        let cleaned = DataCleaner::clean(&working()).unwrap();
        for field in ScatterField::ALL {
            let col = cleaned.column(field.working_column()).unwrap();
            assert_eq!(col.dtype(), &DataType::Float64);
            assert_eq!(col.null_count(), 0);
        }
    }

    #[test]
    fn test_validate_is_row_level_and() {
        let (_, validation) = DataCleaner::validate(&working()).unwrap();
        assert_eq!(validation.passed(), &[true, false, false, false, true]);
    }

    #[test]
    fn test_clean_all_rows_dropped() {
        let df = df![
            "pages_val" => ["x", "y"],
            "blurb_len" => [3.0, 3.0],
            "reviews_val" => ["1", "2"],
            "rating_val" => ["1", "2"],
        ]
        .unwrap();

        let cleaned = DataCleaner::clean(&df).unwrap();
        assert_eq!(cleaned.height(), 0);
        assert_eq!(cleaned.width(), 4);
    }

    #[test]
    fn test_clean_is_stable_on_clean_input() {
        let once = DataCleaner::clean(&working()).unwrap();
        let twice = DataCleaner::clean(&once).unwrap();
        assert!(once.equals(&twice));
    }
}
