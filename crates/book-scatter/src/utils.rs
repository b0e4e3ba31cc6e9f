//! Shared utilities for the scatter data pipeline.
//!
//! Value-level helpers (missing markers, numeric coercion, blurb length) and
//! the quantile routine used by the outlier clipper.

use crate::error::{Result, ScatterError};
use polars::prelude::*;

// =============================================================================
// Missing Value Utilities
// =============================================================================

/// Cell texts treated as missing when the dataset is read.
///
/// This is the default NA token set of pandas' CSV reader, so a cell such as
/// `NA` or `null` counts as absent rather than as text.
pub const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Text a missing value stringifies to.
///
/// A missing `desc` therefore has a blurb length of 3.
pub const MISSING_TEXT: &str = "nan";

/// Check if a raw cell is one of the [`MISSING_MARKERS`].
///
/// Matching is exact and case-sensitive; `" NA "` is ordinary text.
pub fn is_missing_marker(s: &str) -> bool {
    MISSING_MARKERS.contains(&s)
}

/// Normalize a raw cell to `None` if it is null or a missing marker.
pub fn present(cell: Option<&str>) -> Option<&str> {
    cell.filter(|s| !is_missing_marker(s))
}

// =============================================================================
// Coercion Utilities
// =============================================================================

/// Coerce a raw cell to a finite `f64`.
///
/// Surrounding whitespace is ignored. Missing markers, non-numeric text and
/// non-finite results (`inf`, `NaN`) all coerce to `None`.
///
/// # Example
///
/// ```rust,ignore
/// use book_scatter::utils::coerce_numeric;
///
/// assert_eq!(coerce_numeric(Some(" 352 ")), Some(352.0));
/// assert_eq!(coerce_numeric(Some("1,204")), None);
/// assert_eq!(coerce_numeric(None), None);
/// ```
pub fn coerce_numeric(cell: Option<&str>) -> Option<f64> {
    let trimmed = present(cell)?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Character length of a cell's string form.
///
/// Counts Unicode scalar values, not bytes. Missing cells stringify to
/// [`MISSING_TEXT`].
pub fn stringified_len(cell: Option<&str>) -> usize {
    present(cell).unwrap_or(MISSING_TEXT).chars().count()
}

// =============================================================================
// Quantile Utilities
// =============================================================================

/// Empirical quantile of sorted data, linear interpolation between order statistics.
///
/// The virtual rank is `q * (n - 1)`; the result interpolates between the
/// values at `floor(rank)` and `ceil(rank)`. This is the `linear` method of
/// numpy/pandas, including its two-sided lerp: a fraction of at least 0.5
/// interpolates down from the upper neighbour, so a fraction of 1 returns
/// that neighbour exactly.
///
/// `sorted` must be ascending and free of NaN. Returns `None` when empty.
pub fn linear_quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let rank = (q.clamp(0.0, 1.0)) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (rank.ceil() as usize).min(n - 1);
    let t = rank - lo as f64;

    Some(lerp(sorted[lo], sorted[hi], t))
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Sort values ascending. NaNs are expected to be filtered out beforehand.
pub fn sorted_values(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

// =============================================================================
// Column Access Utilities
// =============================================================================

/// Collect a column as `f64` values, casting if needed.
///
/// Nulls become NaN so row positions are preserved.
pub fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| ScatterError::Parse(format!("column '{}' not found", name)))?;
    let series = column.as_materialized_series().cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Collect a text column as optional string slices.
pub fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<Vec<Option<&'a str>>> {
    let column = df
        .column(name)
        .map_err(|_| ScatterError::Parse(format!("required column '{}' is missing", name)))?;
    let chunked = column.as_materialized_series().str().map_err(|e| {
        ScatterError::Parse(format!("column '{}' is not text: {}", name, e))
    })?;
    Ok(chunked.into_iter().collect())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing_marker() {
        assert!(is_missing_marker(""));
        assert!(is_missing_marker("NA"));
        assert!(is_missing_marker("nan"));
        assert!(is_missing_marker("None"));
        assert!(!is_missing_marker("none"));
        assert!(!is_missing_marker(" NA "));
        assert!(!is_missing_marker("42"));
    }

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric(Some("42")), Some(42.0));
        assert_eq!(coerce_numeric(Some(" 4.25 ")), Some(4.25));
        assert_eq!(coerce_numeric(Some("-3")), Some(-3.0));
        assert_eq!(coerce_numeric(Some("1e3")), Some(1000.0));
        assert_eq!(coerce_numeric(Some("1,204")), None);
        assert_eq!(coerce_numeric(Some("many")), None);
        assert_eq!(coerce_numeric(Some("   ")), None);
        assert_eq!(coerce_numeric(Some("NA")), None);
        assert_eq!(coerce_numeric(None), None);
    }

    #[test]
    fn test_coerce_numeric_rejects_non_finite() {
        assert_eq!(coerce_numeric(Some("inf")), None);
        assert_eq!(coerce_numeric(Some("-infinity")), None);
        assert_eq!(coerce_numeric(Some("NaN")), None);
    }

    #[test]
    fn test_stringified_len() {
        assert_eq!(stringified_len(Some("A quiet book.")), 13);
        assert_eq!(stringified_len(Some("café")), 4);
        assert_eq!(stringified_len(None), 3);
        assert_eq!(stringified_len(Some("")), 3);
        assert_eq!(stringified_len(Some("NA")), 3);
    }

    #[test]
    fn test_linear_quantile_basic() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(linear_quantile(&data, 0.0), Some(1.0));
        assert_eq!(linear_quantile(&data, 0.5), Some(3.0));
        assert_eq!(linear_quantile(&data, 1.0), Some(5.0));
        assert_eq!(linear_quantile(&data, 0.25), Some(2.0));
        assert_eq!(linear_quantile(&data, 0.125), Some(1.5));
    }

    #[test]
    fn test_linear_quantile_three_values() {
        let data = [10.0, 200.0, 9999.0];
        let lower = linear_quantile(&data, 0.005).unwrap();
        let upper = linear_quantile(&data, 0.995).unwrap();
        assert!((lower - 11.9).abs() < 1e-9);
        assert!((upper - 9901.01).abs() < 1e-6);
    }

    #[test]
    fn test_linear_quantile_upper_half_interpolates_from_above() {
        assert_eq!(lerp(0.1, 0.7, 1.0), 0.7);
        assert_eq!(lerp(0.1, 0.7, 0.0), 0.1);

        // numpy's _lerp on the same operands: t = 2 * q - floor(2 * q)
        let data = [10.0, 200.0, 9999.0];
        let t_upper = 0.995 * 2.0 - 1.0;
        assert_eq!(linear_quantile(&data, 0.005), Some(10.0 + 190.0 * (0.005 * 2.0)));
        assert_eq!(
            linear_quantile(&data, 0.995),
            Some(9999.0 - 9799.0 * (1.0 - t_upper))
        );
    }

    #[test]
    fn test_linear_quantile_edge_cases() {
        assert_eq!(linear_quantile(&[], 0.5), None);
        assert_eq!(linear_quantile(&[7.0], 0.005), Some(7.0));
        assert_eq!(linear_quantile(&[7.0], 0.995), Some(7.0));
        assert_eq!(linear_quantile(&[2.0, 2.0, 2.0], 0.995), Some(2.0));
    }

    #[test]
    fn test_linear_quantile_monotonic() {
        let data = sorted_values(vec![5.0, -1.0, 3.5, 100.0, 0.0, 42.0]);
        let lower = linear_quantile(&data, 0.005).unwrap();
        let upper = linear_quantile(&data, 0.995).unwrap();
        assert!(lower <= upper);
        assert!(lower >= -1.0 && upper <= 100.0);
    }

    #[test]
    fn test_float_column_and_text_column() {
        let df = df![
            "n" => [Some(1.0), None, Some(3.0)],
            "s" => [Some("a"), None, Some("c")],
        ]
        .unwrap();

        let floats = float_column(&df, "n").unwrap();
        assert_eq!(floats[0], 1.0);
        assert!(floats[1].is_nan());

        let texts = text_column(&df, "s").unwrap();
        assert_eq!(texts, vec![Some("a"), None, Some("c")]);

        assert!(text_column(&df, "missing").is_err());
    }
}
