//! Field extraction.
//!
//! Narrows the loaded table to the working columns and derives the blurb
//! length from the description text.

use crate::error::Result;
use crate::types::ScatterField;
use crate::utils::{present, stringified_len, text_column};
use polars::prelude::*;
use tracing::debug;

/// Selects and renames the plotted fields.
pub struct FieldExtractor;

impl FieldExtractor {
    /// Build the working table: `pages_val`, `blurb_len`, `reviews_val`, `rating_val`.
    ///
    /// The three coerced fields keep their raw text; `blurb_len` is `Float64`.
    ///
    /// A missing description stringifies to `"nan"`, so its blurb length is 3
    /// rather than 0. Downstream consumers rely on this value.
    pub fn extract(df: &DataFrame) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(ScatterField::ALL.len());

        for field in ScatterField::ALL {
            let column = if field.is_derived() {
                Self::blurb_lengths(df)?
            } else {
                let texts = text_column(df, field.source_column())?;
                Series::new(field.working_column().into(), texts)
            };
            columns.push(column.into_column());
        }

        let extracted = DataFrame::new(columns)?;
        debug!("Extracted working columns: {:?}", extracted.get_column_names());
        Ok(extracted)
    }

    fn blurb_lengths(df: &DataFrame) -> Result<Series> {
        let field = ScatterField::Blurb;
        let descs = text_column(df, field.source_column())?;
        let missing = descs.iter().filter(|d| present(**d).is_none()).count();
        let lengths: Vec<f64> = descs
            .into_iter()
            .map(|desc| stringified_len(desc) as f64)
            .collect();

        debug!("Derived {} blurb lengths ({} without a description)", lengths.len(), missing);

        Ok(Series::new(field.working_column().into(), lengths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScatterError;

    fn source() -> DataFrame {
        df![
            "title" => ["Dune", "Emma", "Ulysses"],
            "pages" => [Some("412"), Some("474"), Some("n/a")],
            "desc" => [Some("Sand."), None, Some("NA")],
            "reviews" => [Some("9001"), Some("312"), Some("7")],
            "rating" => [Some("4.25"), Some("3.9"), None],
        ]
        .unwrap()
    }

    #[test]
    fn test_extract_columns_and_order() {
        let extracted = FieldExtractor::extract(&source()).unwrap();
        let names: Vec<String> = extracted
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["pages_val", "blurb_len", "reviews_val", "rating_val"]);
        assert_eq!(extracted.height(), 3);
    }

    #[test]
    fn test_blurb_len_of_text() {
        let extracted = FieldExtractor::extract(&source()).unwrap();
        let blurb = extracted.column("blurb_len").unwrap();
        let blurb = blurb.as_materialized_series().f64().unwrap();
        assert_eq!(blurb.get(0), Some(5.0));
    }

    #[test]
    fn test_blurb_len_of_missing_desc_is_nan_length() {
        let extracted = FieldExtractor::extract(&source()).unwrap();
        let blurb = extracted.column("blurb_len").unwrap();
        let blurb = blurb.as_materialized_series().f64().unwrap();
        // null and the "NA" marker both stringify to "nan"
        assert_eq!(blurb.get(1), Some(3.0));
        assert_eq!(blurb.get(2), Some(3.0));
    }

    #[test]
    fn test_numeric_fields_keep_raw_text() {
        let extracted = FieldExtractor::extract(&source()).unwrap();
        let pages = extracted.column("pages_val").unwrap();
        let pages = pages.as_materialized_series().str().unwrap();
        assert_eq!(pages.get(2), Some("n/a"));
    }

    #[test]
    fn test_extract_missing_column() {
        let df = df![
            "pages" => ["1"],
            "desc" => ["x"],
        ]
        .unwrap();
        let err = FieldExtractor::extract(&df).unwrap_err();
        assert!(matches!(err, ScatterError::Parse(_)));
    }
}
