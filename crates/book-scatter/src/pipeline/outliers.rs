//! Outlier clipping module.
//!
//! Computes per-field percentile bounds on the cleaned table and clamps every
//! value into its field's range.

use crate::cleaner::DataCleaner;
use crate::error::Result;
use crate::types::{ClipBounds, FieldBounds, ScatterField};
use crate::utils::{float_column, linear_quantile, sorted_values};
use polars::prelude::*;
use tracing::{debug, warn};

/// Clamps numeric fields to empirical percentile bounds.
#[derive(Debug, Clone, Copy)]
pub struct OutlierClipper {
    lower_percentile: f64,
    upper_percentile: f64,
}

impl OutlierClipper {
    /// Percentiles are given in percent (e.g. 0.5 and 99.5).
    pub fn new(lower_percentile: f64, upper_percentile: f64) -> Self {
        Self {
            lower_percentile,
            upper_percentile,
        }
    }

    /// Compute bounds, clip, and drop any row left non-finite.
    ///
    /// An empty table is returned unchanged with no bounds.
    pub fn clip(&self, df: &DataFrame) -> Result<(DataFrame, Option<ClipBounds>)> {
        if df.height() == 0 {
            debug!("Skipping outlier clipping on empty dataset");
            return Ok((df.clone(), None));
        }

        let bounds = self.compute_bounds(df)?;
        let clipped = Self::apply(df, &bounds)?;

        let (_, validation) = DataCleaner::validate(&clipped)?;
        let clipped = if validation.all_passed() {
            clipped
        } else {
            warn!(
                "Dropping {} rows with non-finite values after clipping",
                validation.fail_count()
            );
            clipped.filter(&validation.mask())?
        };

        Ok((clipped, Some(bounds)))
    }

    /// Compute the bounds of every field from the current (pre-clip) values.
    pub fn compute_bounds(&self, df: &DataFrame) -> Result<ClipBounds> {
        Ok(ClipBounds {
            pages: self.field_bounds(df, ScatterField::Pages)?,
            blurb: self.field_bounds(df, ScatterField::Blurb)?,
            reviews: self.field_bounds(df, ScatterField::Reviews)?,
            rating: self.field_bounds(df, ScatterField::Rating)?,
        })
    }

    /// Percentile bounds of one field, ignoring non-finite values.
    ///
    /// A field with no finite values gets NaN bounds, which leave values
    /// untouched.
    pub fn field_bounds(&self, df: &DataFrame, field: ScatterField) -> Result<FieldBounds> {
        let values: Vec<f64> = float_column(df, field.working_column())?
            .into_iter()
            .filter(|v| v.is_finite())
            .collect();
        let sorted = sorted_values(values);

        let lower = linear_quantile(&sorted, self.lower_percentile / 100.0).unwrap_or(f64::NAN);
        let upper = linear_quantile(&sorted, self.upper_percentile / 100.0).unwrap_or(f64::NAN);

        debug!(
            "Bounds for '{}': [{}, {}] from {} values",
            field,
            lower,
            upper,
            sorted.len()
        );
        Ok(FieldBounds::new(lower, upper))
    }

    /// Clamp every field into its bounds.
    ///
    /// Each field uses only its own bounds; clipping one field never looks
    /// at another field's clipped values.
    pub fn apply(df: &DataFrame, bounds: &ClipBounds) -> Result<DataFrame> {
        let mut df = df.clone();

        for field in ScatterField::ALL {
            let name = field.working_column();
            let field_bounds = bounds.get(field);

            let float_series = df
                .column(name)?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            let values = float_series.f64()?;

            let outliers = values
                .into_iter()
                .filter(|v| v.is_some_and(|x| x.is_finite() && x != field_bounds.clip(x)))
                .count();

            let clipped = values.apply(|v| v.map(|x| field_bounds.clip(x)));
            df.replace(name, clipped.into_series())?;

            if outliers > 0 {
                debug!("Clipped {} outliers in '{}'", outliers, field);
            }
        }

        Ok(df)
    }
}
