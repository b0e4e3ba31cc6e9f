//! Row survival rule.
//!
//! A row survives only if every field has a finite value. The decision is
//! computed once per row, separately from the filtering, so the rule can be
//! inspected and tested on its own.

use polars::prelude::*;

/// Pass/fail outcome for every row of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowValidation {
    passed: Vec<bool>,
}

impl RowValidation {
    /// Validate rows given column-major values.
    ///
    /// Row `i` passes iff `columns[c][i]` is `Some` finite value for every `c`.
    /// All columns must have the same length.
    pub fn from_columns(columns: &[Vec<Option<f64>>]) -> Self {
        let rows = columns.first().map(|c| c.len()).unwrap_or(0);
        let passed = (0..rows)
            .map(|i| {
                columns
                    .iter()
                    .all(|col| matches!(col.get(i), Some(Some(v)) if v.is_finite()))
            })
            .collect();
        Self { passed }
    }

    pub fn passed(&self) -> &[bool] {
        &self.passed
    }

    pub fn len(&self) -> usize {
        self.passed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passed.is_empty()
    }

    pub fn pass_count(&self) -> usize {
        self.passed.iter().filter(|p| **p).count()
    }

    pub fn fail_count(&self) -> usize {
        self.len() - self.pass_count()
    }

    /// Whether every row passed (nothing to filter).
    pub fn all_passed(&self) -> bool {
        self.passed.iter().all(|p| *p)
    }

    /// Boolean mask suitable for `DataFrame::filter`.
    pub fn mask(&self) -> BooleanChunked {
        BooleanChunked::from_slice("mask".into(), &self.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_required() {
        let columns = vec![
            vec![Some(1.0), Some(2.0), None, Some(4.0)],
            vec![Some(1.0), None, Some(3.0), Some(4.0)],
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        ];

        let validation = RowValidation::from_columns(&columns);
        assert_eq!(validation.passed(), &[true, false, false, true]);
        assert_eq!(validation.pass_count(), 2);
        assert_eq!(validation.fail_count(), 2);
        assert!(!validation.all_passed());
    }

    #[test]
    fn test_non_finite_fails() {
        let columns = vec![vec![Some(f64::NAN), Some(f64::INFINITY), Some(0.0)]];
        let validation = RowValidation::from_columns(&columns);
        assert_eq!(validation.passed(), &[false, false, true]);
    }

    #[test]
    fn test_empty_input() {
        let validation = RowValidation::from_columns(&[]);
        assert!(validation.is_empty());
        assert!(validation.all_passed());
        assert_eq!(validation.mask().len(), 0);
    }

    #[test]
    fn test_mask_matches_passed() {
        let columns = vec![vec![Some(1.0), None]];
        let mask = RowValidation::from_columns(&columns).mask();
        assert_eq!(mask.get(0), Some(true));
        assert_eq!(mask.get(1), Some(false));
    }
}
